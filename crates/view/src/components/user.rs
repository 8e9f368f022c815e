use serde_json::Value;
use trellis_state::State;

use crate::context::{Component, ViewContext};
use crate::fragment::slots;
use crate::node::Node;

/// Best human-readable name of the current user.
pub fn display_name(state: &State) -> Option<String> {
    let user = state.current_user.as_ref()?;
    let lookup = |field: &str| user.get(field).and_then(Value::as_str).map(str::to_string);
    lookup("name")
        .or_else(|| lookup("email"))
        .or_else(|| state.current_user_id())
}

/// Current user's name plus every `userNavigationItems` contribution, or a
/// login link when nobody is logged in.
#[derive(Debug, Clone, Default)]
pub struct UserMenuWidget;

impl Component for UserMenuWidget {
    fn render(&self, cx: &ViewContext<'_>) -> Node {
        let Some(name) = display_name(cx.state) else {
            return Node::link("/login/", "login");
        };

        let items = cx
            .slot(slots::USER_NAVIGATION_ITEMS)
            .into_iter()
            .map(|item| Node::from(Node::el("li").child(item)));

        Node::el("div")
            .class("userMenu")
            .child(Node::el("span").class("userName").child(name))
            .child(Node::el("ul").children(items))
            .into()
    }
}

/// Login dialog, shown while the `showLogin` flag is set and nobody is logged in.
#[derive(Debug, Clone, Default)]
pub struct UserModal;

impl UserModal {
    pub const FLAG: &'static str = "showLogin";
}

impl Component for UserModal {
    fn render(&self, cx: &ViewContext<'_>) -> Node {
        if cx.state.current_user.is_some() || !cx.state.flag(Self::FLAG) {
            return Node::Empty;
        }

        Node::el("div")
            .class("modal")
            .child(Node::el("h2").child("Login"))
            .child(
                Node::el("form")
                    .attr("action", "/login/")
                    .attr("method", "post")
                    .child(Node::el("input").attr("name", "email").attr("type", "email"))
                    .child(
                        Node::el("input")
                            .attr("name", "password")
                            .attr("type", "password"),
                    )
                    .child(Node::el("button").attr("type", "submit").child("login")),
            )
            .into()
    }
}
