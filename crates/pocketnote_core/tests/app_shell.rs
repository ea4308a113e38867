mod common;

use common::{groceries_and_work, writes, FixedPresenter, RecordingStore, StoreCall};
use pocketnote_core::{
    confirmer_for, AppConfig, AppShell, CreateFlow, EditorError, EditorMode, EditorOutcome,
    HeaderAction, HostPlatform, Navigator, Note, NoteDraft, PresetConfirm, Route, SavePolicy,
    ScreenName, ShellError, StackNavigator, INITIAL_SCREEN, SCREENS,
};

fn start(
    config: AppConfig,
    notes: Vec<Note>,
    accept_delete: bool,
) -> (AppShell<StackNavigator>, common::CallLog) {
    let (store, calls) = RecordingStore::new(notes);
    let shell = AppShell::start(
        config,
        Box::new(store),
        StackNavigator::new(),
        Box::new(PresetConfirm(accept_delete)),
    )
    .unwrap();
    (shell, calls)
}

#[test]
fn shell_starts_on_list_with_chrome() {
    let (shell, _) = start(AppConfig::default(), Vec::new(), false);
    assert_eq!(SCREENS, [ScreenName::List, ScreenName::Editor]);
    assert_eq!(INITIAL_SCREEN, ScreenName::List);
    assert_eq!(shell.current_screen(), ScreenName::List);

    let options = shell.navigator().current_options().unwrap();
    assert_eq!(options.title, "Notes");
    assert_eq!(options.header_action, Some(HeaderAction::NewNote));
}

#[test]
fn select_edit_submit_returns_to_refreshed_list() {
    let (groceries, work) = groceries_and_work();
    let (mut shell, calls) = start(AppConfig::default(), vec![groceries, work.clone()], false);
    shell.tick();

    shell.select_note(work.id).unwrap();
    assert_eq!(shell.current_screen(), ScreenName::Editor);
    let options = shell.navigator().current_options().unwrap();
    assert_eq!(options.title, "Edit Note");
    assert_eq!(options.header_action, Some(HeaderAction::DeleteNote));
    assert!(matches!(
        shell.navigator().current(),
        Some(Route::Editor(params)) if params.note.as_ref() == Some(&work)
    ));

    shell
        .editor_mut()
        .unwrap()
        .set_content("updated standup")
        .unwrap();
    assert_eq!(shell.submit_editor().unwrap(), EditorOutcome::Closed);
    assert_eq!(shell.current_screen(), ScreenName::List);
    assert_eq!(shell.navigator().depth(), 1);

    shell.tick();
    assert_eq!(
        writes(&calls),
        vec![StoreCall::Update(Note {
            id: work.id,
            title: "Work".to_string(),
            content: "updated standup".to_string(),
        })]
    );
    let refreshed = shell.list().entries().unwrap();
    assert_eq!(refreshed[1].content, "updated standup");
}

#[test]
fn local_draft_create_opens_create_editor_immediately() {
    let (mut shell, calls) = start(AppConfig::default(), Vec::new(), false);
    shell.tick();
    shell.open_new_note().unwrap();

    let editor = shell.editor().unwrap();
    assert_eq!(editor.mode(), EditorMode::Create);
    assert_eq!(shell.navigator().current_options().unwrap().title, "New Note");
    assert!(writes(&calls).is_empty());

    let err = shell.submit_editor().unwrap_err();
    assert!(matches!(err, ShellError::Editor(EditorError::Validation(_))));
    assert_eq!(shell.current_screen(), ScreenName::Editor);

    let editor = shell.editor_mut().unwrap();
    editor.set_title("Title").unwrap();
    editor.set_content("Body").unwrap();
    shell.submit_editor().unwrap();
    shell.tick();

    assert_eq!(
        writes(&calls),
        vec![StoreCall::Add(NoteDraft::new("Title", "Body"))]
    );
    assert_eq!(shell.list().entries().unwrap().len(), 1);
}

#[test]
fn store_first_create_edits_store_assigned_note_live() {
    let config = AppConfig {
        save_policy: SavePolicy::Live,
        create_flow: CreateFlow::StoreFirst,
        ..AppConfig::default()
    };
    let (mut shell, calls) = start(config, Vec::new(), false);
    shell.tick();

    shell.open_new_note().unwrap();
    assert_eq!(shell.current_screen(), ScreenName::List);
    assert_eq!(shell.open_new_note(), Err(ShellError::CreateInProgress));

    shell.tick();
    let created_id = {
        let editor = shell.editor().unwrap();
        assert_eq!(editor.mode(), EditorMode::Edit);
        assert_eq!(editor.draft(), &NoteDraft::default());
        editor.note_id().unwrap()
    };

    shell.editor_mut().unwrap().set_title("Fresh").unwrap();
    shell.go_back().unwrap();
    shell.tick();

    assert_eq!(
        writes(&calls),
        vec![
            StoreCall::Add(NoteDraft::default()),
            StoreCall::Update(Note {
                id: created_id,
                title: "Fresh".to_string(),
                content: String::new(),
            }),
        ]
    );
    assert_eq!(shell.list().entries().unwrap()[0].title, "Fresh");
}

#[test]
fn failed_store_first_create_stays_on_list_with_notice() {
    let config = AppConfig {
        save_policy: SavePolicy::Live,
        create_flow: CreateFlow::StoreFirst,
        ..AppConfig::default()
    };
    let (store, calls, fail_adds) = RecordingStore::failing_adds();
    let mut shell = AppShell::start(
        config,
        Box::new(store),
        StackNavigator::new(),
        Box::new(PresetConfirm(false)),
    )
    .unwrap();
    shell.tick();

    shell.open_new_note().unwrap();
    shell.tick();
    assert_eq!(shell.current_screen(), ScreenName::List);
    assert!(shell.editor().is_none());
    assert_eq!(shell.navigator().depth(), 1);
    assert!(shell.notice().unwrap().starts_with("Could not create note"));

    fail_adds.set(false);
    shell.open_new_note().unwrap();
    shell.tick();
    assert_eq!(shell.current_screen(), ScreenName::Editor);
    assert_eq!(shell.editor().unwrap().mode(), EditorMode::Edit);
    assert!(shell.notice().is_none());
    assert_eq!(
        writes(&calls),
        vec![
            StoreCall::Add(NoteDraft::default()),
            StoreCall::Add(NoteDraft::default()),
        ]
    );
}

#[test]
fn delete_goes_through_platform_confirmation() {
    let (groceries, work) = groceries_and_work();

    for (platform, accept) in [
        (HostPlatform::Web, true),
        (HostPlatform::Ios, false),
        (HostPlatform::Android, true),
    ] {
        let (store, calls) = RecordingStore::new(vec![groceries.clone(), work.clone()]);
        let (presenter, shown) = FixedPresenter::new(accept);
        let config = AppConfig {
            platform,
            ..AppConfig::default()
        };
        let mut shell = AppShell::start(
            config,
            Box::new(store),
            StackNavigator::new(),
            confirmer_for(platform, presenter),
        )
        .unwrap();
        shell.tick();
        shell.select_note(groceries.id).unwrap();

        let outcome = shell.delete_from_editor().unwrap();
        shell.tick();
        assert_eq!(*shown.borrow(), 1);

        if accept {
            assert_eq!(outcome, EditorOutcome::Closed);
            assert_eq!(writes(&calls), vec![StoreCall::Delete(groceries.clone())]);
            assert_eq!(shell.list().entries().unwrap().len(), 1);
        } else {
            assert_eq!(outcome, EditorOutcome::Active);
            assert!(writes(&calls).is_empty());
            assert_eq!(shell.current_screen(), ScreenName::Editor);
        }
    }
}

#[test]
fn list_actions_are_rejected_while_editing() {
    let (groceries, _) = groceries_and_work();
    let (mut shell, _) = start(AppConfig::default(), vec![groceries.clone()], false);
    shell.tick();
    shell.select_note(groceries.id).unwrap();
    assert_eq!(shell.open_new_note(), Err(ShellError::EditorAlreadyOpen));
    assert_eq!(
        shell.select_note(groceries.id),
        Err(ShellError::EditorAlreadyOpen)
    );
}

#[test]
fn unknown_selection_and_missing_editor_are_errors() {
    let (mut shell, _) = start(AppConfig::default(), Vec::new(), false);
    shell.tick();
    let stranger = common::note("x", "y");
    assert_eq!(
        shell.select_note(stranger.id),
        Err(ShellError::UnknownNote(stranger.id))
    );
    assert_eq!(shell.submit_editor(), Err(ShellError::NoActiveEditor));
    assert_eq!(shell.go_back(), Err(ShellError::NoActiveEditor));
}

#[test]
fn invalid_config_is_rejected_at_start() {
    let (store, _) = RecordingStore::new(Vec::new());
    let config = AppConfig {
        save_policy: SavePolicy::Live,
        ..AppConfig::default()
    };
    let result = AppShell::start(
        config,
        Box::new(store),
        StackNavigator::new(),
        Box::new(PresetConfirm(false)),
    );
    assert!(matches!(result, Err(ShellError::Config(_))));
}

#[test]
fn shutdown_flushes_queued_writes() {
    let (groceries, _) = groceries_and_work();
    let (mut shell, calls) = start(AppConfig::default(), vec![groceries.clone()], false);
    shell.tick();
    shell.select_note(groceries.id).unwrap();
    shell.editor_mut().unwrap().set_title("Shopping").unwrap();
    shell.submit_editor().unwrap();

    let client = shell.client().clone();
    shell.shutdown();
    assert!(client.is_disposed());
    assert_eq!(writes(&calls).len(), 1);
}
