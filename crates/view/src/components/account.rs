use crate::components::user::display_name;
use crate::context::{View, ViewContext};
use crate::node::Node;

/// Container for every route mounted below `account/`.
#[derive(Debug, Clone, Default)]
pub struct AccountView;

impl View for AccountView {
    fn name(&self) -> &str {
        "account"
    }

    fn render(&self, cx: &ViewContext<'_>, outlet: Node) -> Node {
        let Some(name) = display_name(cx.state) else {
            return Node::el("div")
                .class("account")
                .child(Node::el("p").child("Please log in to see your account."))
                .child(Node::link("/login/", "login"))
                .into();
        };

        Node::el("div")
            .class("account")
            .child(Node::el("h1").child(name))
            .child(outlet)
            .into()
    }
}
