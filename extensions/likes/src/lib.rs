use once_cell::sync::Lazy;
use serde_json::Value;
use trellis_state::RequestStatus;
use trellis_view::prelude::*;

static USER_LIKE: Lazy<Schema> = Lazy::new(|| Schema::array("userLike"));

pub const USER_LIKES: &str = "USER_LIKES";
pub const USER_LIKES_REQUEST: &str = "USER_LIKES_REQUEST";
pub const USER_LIKES_SUCCESS: &str = "USER_LIKES_SUCCESS";
pub const USER_LIKES_FAILURE: &str = "USER_LIKES_FAILURE";

/// Likes of the logged-in user.
#[derive(Debug, Clone)]
pub struct Extension {
    users_url: String,
}

impl Extension {
    /// `users_url` is the collection URL user ids are appended to.
    pub fn new(users_url: impl Into<String>) -> Self {
        Self {
            users_url: users_url.into(),
        }
    }
}

impl FeatureModule for Extension {
    fn name(&self) -> &'static str {
        "likes"
    }

    fn register(&self, registry: &mut Registry) {
        registry.add_extension(
            slots::USER_NAVIGATION_ITEMS,
            Node::link(make_url::account("likes/"), "My Likes"),
        );
        registry.add_extension(
            slots::ACCOUNT_ROUTES,
            RouteDescriptor::new("likes/", LikesView::new(self.users_url.clone())),
        );
    }
}

pub fn fetch_user_likes(user_id: &str, users_url: &str) -> ApiCall {
    ApiCall::new(
        ActionTypes::new(USER_LIKES_REQUEST, USER_LIKES_SUCCESS, USER_LIKES_FAILURE),
        format!("{}/{user_id}/likes", users_url.trim_end_matches('/')),
    )
    .with_schema(USER_LIKE.clone())
}

/// Likes of whoever is logged in according to `state`.
pub fn load_user_likes(state: &State, users_url: &str) -> Option<ApiCall> {
    let Some(user_id) = state.current_user_id() else {
        tracing::debug!("no current user, skipping likes");
        return None;
    };
    Some(fetch_user_likes(&user_id, users_url))
}

#[derive(Debug, Clone)]
pub struct LikesView {
    users_url: String,
}

impl LikesView {
    pub fn new(users_url: impl Into<String>) -> Self {
        Self {
            users_url: users_url.into(),
        }
    }
}

fn describe(like: &serde_json::Map<String, Value>) -> Node {
    let subject = like
        .get("subject")
        .and_then(|s| Some(format!("{} {}", s.get("type")?.as_str()?, s.get("id")?.as_str()?)));
    let label = subject
        .or_else(|| like.get("created_at").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "like".to_string());
    Node::el("li").child(label).into()
}

impl View for LikesView {
    fn name(&self) -> &str {
        "likes"
    }

    fn render(&self, cx: &ViewContext<'_>, _outlet: Node) -> Node {
        let likes = cx.state.result_entities(&USER_LIKE.key);

        let body: Node = match cx.state.request_status(USER_LIKES) {
            RequestStatus::Pending => Node::el("p").class("loading").child("Loading…").into(),
            RequestStatus::Failed(message) => Node::el("p").class("error").child(message).into(),
            _ if likes.is_empty() => Node::el("p").child("Nothing liked yet.").into(),
            _ => Node::el("ul").children(likes.into_iter().map(describe)).into(),
        };

        Node::el("section")
            .class("likes")
            .child(Node::el("h2").child("Likes"))
            .child(body)
            .into()
    }

    fn requires(&self, cx: &ViewContext<'_>) -> Vec<ApiCall> {
        load_user_likes(cx.state, &self.users_url).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use serde_json::json;
    use trellis_api::CallApi;
    use trellis_api::http::StaticExecutor;
    use trellis_state::Store;

    use super::*;

    const USERS: &str = "http://localhost:5000/api/users";

    fn logged_in() -> State {
        State::from_preload(None, Some(json!({ "id": 3, "name": "pg" })))
    }

    #[test]
    fn endpoint_joins_user_id() {
        let call = fetch_user_likes("3", "http://localhost:5000/api/users/");
        assert_eq!(call.endpoint, "http://localhost:5000/api/users/3/likes");
        assert_eq!(call.types.success, "USER_LIKES_SUCCESS");
        assert_eq!(call.types.name, USER_LIKES);
        assert_eq!(call.schema, Some(Schema::array("userLike")));
    }

    #[test]
    fn anonymous_users_load_nothing() {
        assert!(load_user_likes(&State::default(), USERS).is_none());
        assert_eq!(
            load_user_likes(&logged_in(), USERS).map(|c| c.endpoint),
            Some(format!("{USERS}/3/likes"))
        );
    }

    #[test]
    fn registers_link_and_route() {
        let mut registry = Registry::new();
        Extension::new(USERS).register(&mut registry);

        assert_eq!(
            Fragment::nodes(&registry, slots::USER_NAVIGATION_ITEMS),
            vec![Node::link("/account/likes/", "My Likes")]
        );
        let routes = Fragment::routes(&registry, slots::ACCOUNT_ROUTES);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "likes/");
    }

    #[tokio::test]
    async fn view_renders_loaded_likes() {
        let executor = StaticExecutor::new().with_json(
            format!("{USERS}/3/likes"),
            json!({
                "data": [{
                    "type": "like",
                    "id": "8",
                    "relationships": { "subject": { "data": { "type": "story", "id": "5" } } }
                }]
            }),
        );
        let api = CallApi::new(Arc::new(executor));
        let mut store = Store::new(logged_in());
        let registry = Registry::new();
        let params = BTreeMap::new();
        let view = LikesView::new(USERS);

        let calls = view.requires(&ViewContext::new(&registry, store.state(), &params, "/"));
        for call in &calls {
            api.call(call, &mut store).await;
        }

        let cx = ViewContext::new(&registry, store.state(), &params, "/account/likes/");
        let node = view.render(&cx, Node::Empty);
        assert_eq!(node.text_content(), "Likesstory 5");
    }

    #[tokio::test]
    async fn failed_load_shows_error() {
        let api = CallApi::new(Arc::new(
            StaticExecutor::new().with_error(format!("{USERS}/3/likes"), "connection refused"),
        ));
        let mut store = Store::new(logged_in());
        let registry = Registry::new();
        let params = BTreeMap::new();

        if let Some(call) = load_user_likes(store.state(), USERS) {
            api.call(&call, &mut store).await;
        }

        let cx = ViewContext::new(&registry, store.state(), &params, "/account/likes/");
        let html = LikesView::new(USERS).render(&cx, Node::Empty).render_html();
        assert!(html.contains(r#"<p class="error">"#));
    }
}
