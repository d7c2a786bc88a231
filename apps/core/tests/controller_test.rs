use quickmenu_core::controller::{Commit, InvokeError, Invoker, LauncherController};
use quickmenu_core::cursor::MoveDirection;
use quickmenu_core::model::CatalogEntry;
use quickmenu_core::ranker::RankOptions;
use quickmenu_core::weights::UsageWeights;

#[derive(Default)]
struct RecordingInvoker {
    invoked: Vec<String>,
    fail_next: bool,
}

impl Invoker for RecordingInvoker {
    fn invoke(&mut self, path: &str) -> Result<(), InvokeError> {
        self.invoked.push(path.to_string());
        if self.fail_next {
            self.fail_next = false;
            return Err(InvokeError::new(format!("entry no longer exists: {path}")));
        }
        Ok(())
    }
}

fn sample_controller() -> LauncherController {
    let catalog: Vec<CatalogEntry> = ["3D/Axis", "3D/Camera", "Draw/Rectangle", "Draw/Text"]
        .iter()
        .map(|path| CatalogEntry::new(*path))
        .collect();
    LauncherController::new(catalog, UsageWeights::new(), RankOptions::default())
}

#[test]
fn initial_state_shows_full_catalog_with_cursor_on_top() {
    let controller = sample_controller();
    assert_eq!(controller.query(), "");
    assert_eq!(controller.results().len(), 4);
    assert_eq!(controller.cursor_position(), Some(0));
}

#[test]
fn query_change_replaces_results_and_resets_cursor() {
    let mut controller = sample_controller();
    controller.move_cursor(MoveDirection::Down);
    controller.move_cursor(MoveDirection::Down);
    assert_eq!(controller.cursor_position(), Some(2));

    let results = controller.set_query("cam");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry.path(), "3D/Camera");
    assert_eq!(controller.cursor_position(), Some(0));
}

#[test]
fn commit_increments_weight_invokes_and_rearms() {
    let mut controller = sample_controller();
    let mut invoker = RecordingInvoker::default();

    controller.set_query("cam");
    let commit = controller.commit(&mut invoker).expect("commit should pick a result");

    assert_eq!(
        commit,
        Commit {
            entry_path: "3D/Camera".to_string(),
            invoke_error: None,
        }
    );
    assert_eq!(invoker.invoked, vec!["3D/Camera"]);
    assert_eq!(controller.weights().count("3D/Camera"), 1);

    // Re-armed: query cleared, full catalog ranked with the committed
    // entry promoted to the top.
    assert_eq!(controller.query(), "");
    assert_eq!(controller.cursor_position(), Some(0));
    let paths: Vec<&str> = controller
        .results()
        .iter()
        .map(|r| r.entry.path())
        .collect();
    assert_eq!(
        paths,
        vec!["3D/Camera", "3D/Axis", "Draw/Rectangle", "Draw/Text"]
    );
}

#[test]
fn commit_with_explicit_selection_uses_cursor_entry() {
    let mut controller = sample_controller();
    let mut invoker = RecordingInvoker::default();

    controller.move_cursor(MoveDirection::Down);
    controller.move_cursor(MoveDirection::Down);
    let commit = controller.commit(&mut invoker).unwrap();
    assert_eq!(commit.entry_path, "Draw/Rectangle");
}

#[test]
fn commit_with_no_results_is_a_noop() {
    let mut controller = sample_controller();
    let mut invoker = RecordingInvoker::default();

    controller.set_query("no such entry");
    assert!(controller.results().is_empty());
    assert!(controller.commit(&mut invoker).is_none());
    assert!(invoker.invoked.is_empty());
    assert!(controller.weights().is_empty());
}

#[test]
fn failed_invoke_is_reported_and_weight_increment_sticks() {
    let mut controller = sample_controller();
    let mut invoker = RecordingInvoker {
        fail_next: true,
        ..Default::default()
    };

    controller.set_query("text");
    let commit = controller.commit(&mut invoker).unwrap();

    assert_eq!(commit.entry_path, "Draw/Text");
    assert!(commit.invoke_error.is_some());
    // Best-effort: the increment is not rolled back.
    assert_eq!(controller.weights().count("Draw/Text"), 1);
    // The launcher still re-armed normally.
    assert_eq!(controller.query(), "");
    assert_eq!(controller.results().len(), 4);
}

#[test]
fn cancel_clears_without_touching_weights() {
    let mut controller = sample_controller();

    controller.set_query("cam");
    controller.cancel();

    assert_eq!(controller.query(), "");
    assert_eq!(controller.results().len(), 4);
    assert!(controller.weights().is_empty());
}

#[test]
fn end_to_end_usage_learning_scenario() {
    let catalog: Vec<CatalogEntry> = ["3D/Axis", "3D/Camera", "Draw/Rectangle", "Draw/Text"]
        .iter()
        .map(|path| CatalogEntry::new(*path))
        .collect();
    let options = RankOptions {
        limit: 2,
        ..Default::default()
    };
    let mut controller = LauncherController::new(catalog, UsageWeights::new(), options);
    let mut invoker = RecordingInvoker::default();

    let results = controller.set_query("cam");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry.path(), "3D/Camera");
    assert_eq!(results[0].score, 0.0);

    let commit = controller.commit(&mut invoker).unwrap();
    assert_eq!(commit.entry_path, "3D/Camera");
    assert_eq!(controller.weights().count("3D/Camera"), 1);

    let top: Vec<&str> = controller
        .set_query("")
        .iter()
        .map(|r| r.entry.path())
        .collect();
    assert_eq!(top, vec!["3D/Camera", "3D/Axis"]);
}
