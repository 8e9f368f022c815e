//! Start-up sequence and navigation against fixture backends.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use trellis_api::http::StaticExecutor;
use trellis_api::{ActionTypes, ApiCall, Schema};
use trellis_shell::{BootError, Environment, ModuleList, Preload, Shell, ShellConfig};
use trellis_view::prelude::*;

struct Frame;

impl View for Frame {
    fn name(&self) -> &str {
        "frame"
    }

    fn render(&self, _cx: &ViewContext<'_>, outlet: Node) -> Node {
        Node::el("main").child(outlet).into()
    }
}

struct Stories;

impl View for Stories {
    fn name(&self) -> &str {
        "stories"
    }

    fn render(&self, cx: &ViewContext<'_>, _outlet: Node) -> Node {
        let titles = cx
            .state
            .result_entities("stories")
            .into_iter()
            .filter_map(|story| story.get("title").and_then(|t| t.as_str()))
            .map(|title| Node::from(Node::el("li").child(Node::text(title))))
            .collect::<Vec<_>>();
        Node::el("ul").children(titles).into()
    }

    fn requires(&self, _cx: &ViewContext<'_>) -> Vec<ApiCall> {
        vec![
            ApiCall::new(ActionTypes::prefixed("STORIES"), "stories")
                .with_schema(Schema::array("stories")),
        ]
    }
}

struct Site;

impl FeatureModule for Site {
    fn name(&self) -> &'static str {
        "site"
    }

    fn register(&self, registry: &mut Registry) {
        registry.add_named_extension(slots::APP, "site", Fragment::app(Frame));
        registry.add_extension(slots::ROOT_ROUTES, RouteDescriptor::new("stories/", Stories));
    }
}

fn config() -> ShellConfig {
    ShellConfig {
        app: "site".to_string(),
        api_url: "http://localhost:5000/api/".to_string(),
        ..Default::default()
    }
}

fn boot(executor: StaticExecutor) -> Result<Shell, BootError> {
    Shell::boot(
        config(),
        &Environment::top_level(false),
        &ModuleList::new().with(Site),
        Arc::new(executor),
        Preload::default(),
    )
}

#[test]
fn framed_production_boot_is_refused() {
    let result = Shell::boot(
        config(),
        &Environment::from_frames(false, &"child", &"parent"),
        &ModuleList::new().with(Site),
        Arc::new(StaticExecutor::new()),
        Preload::default(),
    );

    assert!(matches!(
        result,
        Err(BootError::FrameEmbedding { reload_parent: true })
    ));
}

#[test]
fn framed_debug_boot_is_allowed() {
    let result = Shell::boot(
        config(),
        &Environment::from_frames(true, &"child", &"parent"),
        &ModuleList::new().with(Site),
        Arc::new(StaticExecutor::new()),
        Preload::default(),
    );
    assert!(result.is_ok());
}

#[test]
fn unknown_application_lists_registered_ones() {
    let result = Shell::boot(
        ShellConfig {
            app: "blog".to_string(),
            ..config()
        },
        &Environment::default(),
        &ModuleList::new().with(Site),
        Arc::new(StaticExecutor::new()),
        Preload::default(),
    );

    match result {
        Err(BootError::UnknownApplication { name, available }) => {
            assert_eq!(name, "blog");
            assert_eq!(available, vec!["site"]);
        }
        other => panic!("unexpected boot result: {:?}", other.err()),
    }
}

#[tokio::test]
async fn navigate_loads_required_data_then_renders() {
    let mut shell = boot(StaticExecutor::new().with_json(
        "http://localhost:5000/api/stories",
        json!({
            "data": [
                { "type": "story", "id": "2", "attributes": { "title": "Show HN" } },
                { "type": "story", "id": "1", "attributes": { "title": "Ask HN" } }
            ]
        }),
    ))
    .unwrap();

    let html = shell.render("/stories/").await.unwrap();

    assert_eq!(html, "<main><ul><li>Show HN</li><li>Ask HN</li></ul></main>");
    assert_eq!(
        shell.store().history(),
        ["STORIES_REQUEST", "STORIES_SUCCESS"]
    );
}

#[tokio::test]
async fn failed_load_still_renders() {
    let mut shell = boot(StaticExecutor::new()).unwrap();

    let html = shell.render("/stories/").await.unwrap();

    assert_eq!(html, "<main><ul></ul></main>");
    assert_eq!(
        shell.store().history(),
        ["STORIES_REQUEST", "STORIES_FAILURE"]
    );
}

#[tokio::test]
async fn unmatched_path_is_not_found() {
    let mut shell = boot(StaticExecutor::new()).unwrap();
    assert!(matches!(
        shell.navigate("/nope/").await,
        Err(BootError::NotFound { .. })
    ));
}

#[test]
fn preload_seeds_the_store() {
    let preload = Preload::from_json(
        &json!({
            "PAYLOAD": {
                "key": "stories",
                "data": { "data": [{ "type": "story", "id": "7", "attributes": { "title": "Seeded" } }] }
            },
            "CURRENT_USER": { "data": { "type": "user", "id": "3", "attributes": { "name": "pg" } } }
        })
        .to_string(),
    )
    .unwrap();

    let shell = Shell::boot(
        config(),
        &Environment::default(),
        &ModuleList::new().with(Site),
        Arc::new(StaticExecutor::new()),
        preload,
    )
    .unwrap();

    assert_eq!(shell.store().get_entity("story", "7").unwrap()["title"], "Seeded");
    assert_eq!(shell.state().current_user_id().as_deref(), Some("3"));
}

#[test]
fn config_file_then_env_overrides() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "app = \"site\"\napi_url = \"https://news.example.com/api\"\ndebug = true"
    )
    .unwrap();

    let vars = HashMap::from([(
        "TRELLIS_API_URL".to_string(),
        "https://staging.example.com/api/".to_string(),
    )]);
    let config = ShellConfig::load_with_vars(Some(file.path()), Some(vars)).unwrap();

    assert_eq!(config.app, "site");
    assert!(config.debug);
    assert_eq!(config.api_url, "https://staging.example.com/api/");
    assert_eq!(
        config.users_url().unwrap(),
        "https://staging.example.com/api/users"
    );
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let config = ShellConfig::load_with_vars(Some(missing.as_path()), Some(HashMap::new()));
    assert!(config.is_err());
}
