use once_cell::sync::Lazy;
use trellis_view::prelude::*;

pub const APP_NAME: &str = "hacker_news";

const LOGO: &str = "http://svgporn.com/logos/ycombinator.svg";

static STYLES: Lazy<MenuStyles> =
    Lazy::new(|| MenuStyles::default().with_logo("hnLogo").with_title("hnTitle"));

/// The Hacker News flavoured application shell.
#[derive(Debug, Default)]
pub struct Extension;

impl FeatureModule for Extension {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn register(&self, registry: &mut Registry) {
        registry.add_named_extension(slots::APP, APP_NAME, Fragment::app(HackerNews));
        registry.add_extension(slots::ROOT_ROUTES, RouteDescriptor::new("submit/", SubmitView));
    }
}

#[derive(Debug, Default)]
pub struct HackerNews;

impl View for HackerNews {
    fn name(&self) -> &str {
        APP_NAME
    }

    fn render(&self, cx: &ViewContext<'_>, outlet: Node) -> Node {
        let menu = MainMenu::new()
            .styles(STYLES.clone())
            .logo(LOGO)
            .title("Hacker News")
            .navigation_tools(UserMenuWidget.render(cx))
            .child(Node::link(make_url::account("comments/"), "threads"))
            .child(Node::link("/submit/", "submit"));

        Node::el("div")
            .class("hackerNews")
            .child(UserModal.render(cx))
            .child(menu.render(cx))
            .child(outlet)
            .into()
    }
}

/// Story submission form. Anonymous visitors get a login link instead.
#[derive(Debug, Default)]
pub struct SubmitView;

impl View for SubmitView {
    fn name(&self) -> &str {
        "submit"
    }

    fn render(&self, cx: &ViewContext<'_>, _outlet: Node) -> Node {
        if cx.state.current_user.is_none() {
            tracing::debug!("anonymous visitor on submit page");
            return Node::el("div")
                .class("submit")
                .child(Node::el("p").child("You have to be logged in to submit."))
                .child(Node::link("/login/", "login"))
                .into();
        }

        let field = |name: &str, kind: &str| {
            Node::from(
                Node::el("label")
                    .child(name.to_string())
                    .child(Node::el("input").attr("name", name).attr("type", kind)),
            )
        };

        Node::el("div")
            .class("submit")
            .child(
                Node::el("form")
                    .attr("action", "/submit/")
                    .attr("method", "post")
                    .children([field("title", "text"), field("url", "url")])
                    .child(Node::el("textarea").attr("name", "text"))
                    .child(Node::el("button").attr("type", "submit").child("submit")),
            )
            .into()
    }
}
