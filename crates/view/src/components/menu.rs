use crate::context::{Component, ViewContext};
use crate::fragment::slots;
use crate::node::Node;

/// CSS class names used by [`MainMenu`]. Applications override single fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuStyles {
    pub menu: String,
    pub logo: String,
    pub title: String,
    pub items: String,
    pub navigation: String,
}

impl Default for MenuStyles {
    fn default() -> Self {
        Self {
            menu: "mainMenu".to_string(),
            logo: "logo".to_string(),
            title: "title".to_string(),
            items: "items".to_string(),
            navigation: "navigation".to_string(),
        }
    }
}

impl MenuStyles {
    pub fn with_logo(mut self, class: impl Into<String>) -> Self {
        self.logo = class.into();
        self
    }

    pub fn with_title(mut self, class: impl Into<String>) -> Self {
        self.title = class.into();
        self
    }
}

/// Top navigation bar.
///
/// Renders `children` followed by the `MainMenuItem` slot as menu entries,
/// and `navigation_tools` followed by the `MainNavigationTools` slot on the
/// right-hand side.
#[derive(Debug, Clone, Default)]
pub struct MainMenu {
    pub styles: MenuStyles,
    pub logo: Option<String>,
    pub title: Option<String>,
    pub navigation_tools: Option<Node>,
    pub children: Vec<Node>,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styles(mut self, styles: MenuStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn logo(mut self, url: impl Into<String>) -> Self {
        self.logo = Some(url.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn navigation_tools(mut self, tools: impl Into<Node>) -> Self {
        self.navigation_tools = Some(tools.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl Component for MainMenu {
    fn render(&self, cx: &ViewContext<'_>) -> Node {
        let brand = Node::link(
            "/",
            Node::fragment([
                self.logo.as_ref().map_or(Node::Empty, |src| {
                    Node::el("img")
                        .class(&self.styles.logo)
                        .attr("src", src)
                        .into()
                }),
                self.title.as_ref().map_or(Node::Empty, |title| {
                    Node::el("span")
                        .class(&self.styles.title)
                        .child(title.as_str())
                        .into()
                }),
            ]),
        );

        let items = self
            .children
            .iter()
            .cloned()
            .chain(cx.slot(slots::MAIN_MENU_ITEM))
            .map(|item| Node::from(Node::el("li").child(item)));

        let tools = self
            .navigation_tools
            .iter()
            .cloned()
            .chain(cx.slot(slots::MAIN_NAVIGATION_TOOLS));

        Node::el("nav")
            .class(&self.styles.menu)
            .child(brand)
            .child(Node::el("ul").class(&self.styles.items).children(items))
            .child(Node::el("div").class(&self.styles.navigation).children(tools))
            .into()
    }
}
