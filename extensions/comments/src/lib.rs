use once_cell::sync::Lazy;
use serde_json::Value;
use trellis_state::RequestStatus;
use trellis_view::prelude::*;

static COMMENT_LIST: Lazy<Schema> = Lazy::new(|| Schema::array("comments"));
static COMMENT: Lazy<Schema> = Lazy::new(|| Schema::entity("comment"));

/// Comments of the logged-in user, mounted below the account pages.
#[derive(Debug, Default)]
pub struct Extension;

impl FeatureModule for Extension {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn register(&self, registry: &mut Registry) {
        registry.add_extension(
            slots::USER_NAVIGATION_ITEMS,
            lazy_node(|| Node::link(make_url::account("comments/"), "My Comments")),
        );
        registry.add_extension(
            slots::ACCOUNT_ROUTES,
            RouteDescriptor::new("comments/", CommentsView),
        );
        registry.add_extension(
            slots::ACCOUNT_ROUTES,
            RouteDescriptor::new("comments/:commentId/", CommentView),
        );
    }
}

pub fn load_comments() -> ApiCall {
    ApiCall::new(ActionTypes::prefixed("COMMENTS"), "comments/")
        .with_schema(COMMENT_LIST.clone())
}

pub fn load_comment(id: &str) -> ApiCall {
    ApiCall::new(ActionTypes::prefixed("COMMENT"), format!("comments/{id}/"))
        .with_schema(COMMENT.clone())
}

fn comment_text(comment: &serde_json::Map<String, Value>) -> String {
    comment
        .get("text")
        .or_else(|| comment.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn status_line(status: RequestStatus) -> Node {
    match status {
        RequestStatus::Pending => Node::el("p").class("loading").child("Loading…").into(),
        RequestStatus::Failed(message) => Node::el("p").class("error").child(message).into(),
        RequestStatus::Idle | RequestStatus::Loaded => Node::Empty,
    }
}

#[derive(Debug, Default)]
pub struct CommentsView;

impl View for CommentsView {
    fn name(&self) -> &str {
        "comments"
    }

    fn render(&self, cx: &ViewContext<'_>, _outlet: Node) -> Node {
        let items = cx
            .state
            .result_entities(&COMMENT_LIST.key)
            .into_iter()
            .filter_map(|comment| {
                let id = comment.get("id")?.as_str()?;
                let link = Node::link(make_url::account(&format!("comments/{id}/")), comment_text(comment));
                Some(Node::from(Node::el("li").child(link)))
            });

        Node::el("section")
            .class("comments")
            .child(Node::el("h2").child("Comments"))
            .child(status_line(cx.state.request_status("COMMENTS")))
            .child(Node::el("ul").children(items))
            .into()
    }

    fn requires(&self, cx: &ViewContext<'_>) -> Vec<ApiCall> {
        if cx.state.current_user.is_none() {
            return Vec::new();
        }
        vec![load_comments()]
    }
}

#[derive(Debug, Default)]
pub struct CommentView;

impl View for CommentView {
    fn name(&self) -> &str {
        "comment"
    }

    fn render(&self, cx: &ViewContext<'_>, _outlet: Node) -> Node {
        let comment = cx
            .param("commentId")
            .and_then(|id| cx.state.entity("comment", id));

        let Some(comment) = comment else {
            return Node::el("article")
                .class("comment")
                .child(status_line(cx.state.request_status("COMMENT")))
                .into();
        };

        Node::el("article")
            .class("comment")
            .child(Node::el("p").child(comment_text(comment)))
            .child(Node::link(make_url::account("comments/"), "back"))
            .into()
    }

    fn requires(&self, cx: &ViewContext<'_>) -> Vec<ApiCall> {
        if cx.state.current_user.is_none() {
            return Vec::new();
        }
        match cx.param("commentId") {
            Some(id) if cx.state.entity("comment", id).is_none() => vec![load_comment(id)],
            Some(_) => Vec::new(),
            None => {
                tracing::warn!(path = cx.path, "comment route without an id");
                Vec::new()
            }
        }
    }
}
