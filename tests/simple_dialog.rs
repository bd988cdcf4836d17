use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tape_dialog::{
    create_simple_index, create_simple_index_with, destroy_simple_index, AppContext,
    BridgeState, ConfigValue, DefaultWindowFactory, DialogKind, EnvConfig, HelpBar, HelpMapping,
    MenuKind, MenuState, Notification, NotifyOutcome, WindowFactory, WindowIds, WindowKind,
    WindowNode, WindowRc, STATUS_ON_TOP,
};

const ALIAS_HELP: &[HelpMapping] = &[
    HelpMapping::new("q", "Exit"),
    HelpMapping::new("d", "Delete"),
    HelpMapping::new("?", "Help"),
];

fn context(status_on_top: bool) -> AppContext {
    AppContext::new(&EnvConfig {
        status_on_top,
        log_filter: None,
    })
}

fn ids_of(children: &[WindowRc]) -> Vec<u64> {
    children.iter().map(|child| child.borrow().id().raw()).collect()
}

#[test]
fn initial_order_follows_status_on_top() {
    for status_on_top in [false, true] {
        let mut ctx = context(status_on_top);
        let dialog = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);

        let expected = if status_on_top {
            vec![WindowKind::StatusBar, WindowKind::Menu]
        } else {
            vec![WindowKind::Menu, WindowKind::StatusBar]
        };
        assert_eq!(dialog.child_kinds(), expected);
        dialog.destroy(&mut ctx);
    }
}

#[test]
fn dialog_root_carries_focus_help_and_menu_state() {
    let mut ctx = context(false);
    let dialog = create_simple_index(
        &mut ctx,
        MenuKind::Alias,
        DialogKind::Alias,
        Some(ALIAS_HELP),
    );

    let root = dialog.window().borrow();
    assert_eq!(root.kind(), WindowKind::Dialog(DialogKind::Alias));
    let help = root.help().expect("help binding attached");
    assert_eq!(help.menu, MenuKind::Alias);
    assert_eq!(help.table, Some(ALIAS_HELP));

    let content = dialog.content().expect("focus target set");
    assert_eq!(content.borrow().kind(), WindowKind::Menu);
    assert_eq!(ctx.focus().focused_id(), Some(content.borrow().id()));
    assert!(content.borrow_mut().is_focused());

    let wdata = root.wdata().expect("menu state copied to root");
    let state = MenuState::from_wdata(&wdata).expect("wdata is menu state");
    assert_eq!(state.borrow().kind, MenuKind::Alias);

    let mut help_bar = HelpBar::for_window(&root).expect("help table present");
    assert_eq!(
        tape_dialog::Component::render(&mut help_bar, 30)[0].trim_end(),
        "q:Exit  d:Delete  ?:Help"
    );
    drop(root);
    dialog.destroy(&mut ctx);
}

#[test]
fn destroy_twice_is_a_no_op() {
    let mut ctx = context(false);
    let mut slot = Some(create_simple_index(
        &mut ctx,
        MenuKind::Query,
        DialogKind::Query,
        None,
    ));
    let root = Rc::downgrade(slot.as_ref().expect("just created").window());

    destroy_simple_index(&mut ctx, &mut slot);
    assert!(slot.is_none());
    assert!(root.upgrade().is_none());
    assert!(ctx.dialogs().is_empty());
    assert_eq!(ctx.bus().observer_count(), 0);

    destroy_simple_index(&mut ctx, &mut slot);
    assert!(slot.is_none());
    assert!(ctx.dialogs().is_empty());
}

#[test]
fn status_bar_follows_config_changes_in_place() {
    let mut ctx = context(false);
    let dialog = create_simple_index(&mut ctx, MenuKind::Pgp, DialogKind::Pgp, None);
    let before = ids_of(dialog.window().borrow().children());
    let content = dialog.content().expect("content");
    let status = dialog.status_bar().expect("status bar");
    dialog.render(20, 5);
    assert!(!dialog.window().borrow().is_dirty());

    assert_eq!(ctx.config().set_bool(STATUS_ON_TOP, true), Ok(true));
    assert_eq!(
        dialog.child_kinds(),
        vec![WindowKind::StatusBar, WindowKind::Menu]
    );
    assert!(dialog.window().borrow().is_dirty());
    {
        let root = dialog.window().borrow();
        assert!(Rc::ptr_eq(&root.children()[0], &status));
        assert!(Rc::ptr_eq(&root.children()[1], &content));
        assert_eq!(root.focus(), Some(content.borrow().id()));
    }

    assert_eq!(ctx.config().set_bool(STATUS_ON_TOP, false), Ok(true));
    assert_eq!(ids_of(dialog.window().borrow().children()), before);
    assert!(Rc::ptr_eq(&dialog.window().borrow().children()[0], &content));

    dialog.destroy(&mut ctx);
}

#[test]
fn unrelated_settings_leave_layout_alone() {
    let mut ctx = context(false);
    let dialog = create_simple_index(&mut ctx, MenuKind::Folder, DialogKind::Browser, None);
    ctx.config()
        .register("sort_browser", ConfigValue::Str("alpha".into()));

    assert_eq!(ctx.config().set_str("sort_browser", "date"), Ok(true));
    assert_eq!(
        dialog.child_kinds(),
        vec![WindowKind::Menu, WindowKind::StatusBar]
    );

    let report = ctx.bus().dispatch(&Notification::config_changed("sort_browser"));
    assert_eq!(report.count(NotifyOutcome::Ignored), 1);
    assert_eq!(report.count(NotifyOutcome::Handled), 0);

    dialog.destroy(&mut ctx);
}

#[test]
fn destroyed_dialog_receives_nothing() {
    let mut ctx = context(false);
    let dialog = create_simple_index(&mut ctx, MenuKind::Smime, DialogKind::Smime, None);
    let root = Rc::downgrade(dialog.window());
    assert_eq!(dialog.bridge_state(), BridgeState::Active);
    assert_eq!(ctx.bus().observer_count(), 1);

    dialog.destroy(&mut ctx);
    assert_eq!(ctx.bus().observer_count(), 0);

    let report = ctx.bus().dispatch(&Notification::config_changed(STATUS_ON_TOP));
    assert_eq!(report.delivered(), 0);
    assert_eq!(ctx.config().set_bool(STATUS_ON_TOP, true), Ok(true));
    assert!(root.upgrade().is_none());
}

#[test]
fn stack_is_lifo_and_focus_returns_to_previous_dialog() {
    let mut ctx = context(false);
    let first = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);
    assert_eq!(ctx.dialogs().top(), Some(first.id()));

    let second = create_simple_index(&mut ctx, MenuKind::Query, DialogKind::Query, None);
    assert_eq!(ctx.dialogs().top(), Some(second.id()));
    assert_eq!(ctx.dialogs().ids(), vec![first.id(), second.id()]);
    let second_content = second.content().expect("content");
    assert_eq!(ctx.focus().focused_id(), Some(second_content.borrow().id()));

    second.destroy(&mut ctx);
    assert_eq!(ctx.dialogs().top(), Some(first.id()));
    let first_content = first.content().expect("content");
    assert_eq!(ctx.focus().focused_id(), Some(first_content.borrow().id()));
    assert!(first_content.borrow_mut().is_focused());
    assert!(!second_content.borrow_mut().is_focused());

    first.destroy(&mut ctx);
    assert!(ctx.dialogs().is_empty());
    assert!(ctx.focus().focused().is_none());
}

#[test]
fn every_open_dialog_follows_the_setting() {
    let mut ctx = context(false);
    let first = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);
    let second = create_simple_index(&mut ctx, MenuKind::Postpone, DialogKind::Postpone, None);

    assert_eq!(ctx.config().toggle_bool(STATUS_ON_TOP), Ok(true));
    for dialog in [&first, &second] {
        assert_eq!(
            dialog.child_kinds(),
            vec![WindowKind::StatusBar, WindowKind::Menu]
        );
    }

    second.destroy(&mut ctx);
    assert_eq!(ctx.bus().observer_count(), 1);
    first.destroy(&mut ctx);
    assert_eq!(ctx.bus().observer_count(), 0);
}

#[test]
fn out_of_order_close_still_unregisters() {
    let mut ctx = context(false);
    let first = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);
    let second = create_simple_index(&mut ctx, MenuKind::Query, DialogKind::Query, None);
    let second_id = second.id();

    first.destroy(&mut ctx);
    assert_eq!(ctx.dialogs().ids(), vec![second_id]);
    assert_eq!(ctx.bus().observer_count(), 1);

    second.destroy(&mut ctx);
    assert!(ctx.dialogs().is_empty());
}

#[test]
fn rendered_rows_follow_the_layout() {
    let mut ctx = context(false);
    let dialog = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);
    let state = {
        let wdata = dialog.window().borrow().wdata().expect("wdata");
        MenuState::from_wdata(&wdata).expect("menu state")
    };
    state
        .borrow_mut()
        .set_items(vec!["alice".to_string(), "bob".to_string()]);

    assert_eq!(
        dialog.render(12, 4),
        vec!["→ alice", "  bob", "            ", " Aliases    "]
    );

    ctx.config()
        .set_bool(STATUS_ON_TOP, true)
        .expect("status_on_top is registered");
    assert_eq!(
        dialog.render(12, 4),
        vec![" Aliases    ", "→ alice", "  bob", "            "]
    );
    assert!(!dialog.window().borrow().is_dirty());

    dialog.destroy(&mut ctx);
}

#[test]
fn dropped_dialog_leaves_the_stack() {
    let mut ctx = context(false);
    let first = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);
    let first_id = first.id();
    drop(first);
    assert_eq!(ctx.dialogs().top(), None);
    assert_eq!(ctx.bus().observer_count(), 0);

    let second = create_simple_index(&mut ctx, MenuKind::Query, DialogKind::Query, None);
    assert_eq!(ctx.dialogs().ids(), vec![second.id()]);
    assert!(!ctx.dialogs().contains(first_id));

    second.destroy(&mut ctx);
    assert!(ctx.dialogs().is_empty());
    assert!(ctx.focus().focused().is_none());
}

#[test]
fn dropped_dialog_below_does_not_block_destroy() {
    let mut ctx = context(false);
    let bottom = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);
    let middle = create_simple_index(&mut ctx, MenuKind::Query, DialogKind::Query, None);
    let top = create_simple_index(&mut ctx, MenuKind::Pgp, DialogKind::Pgp, None);

    drop(middle);
    top.destroy(&mut ctx);
    assert_eq!(ctx.dialogs().ids(), vec![bottom.id()]);
    let content = bottom.content().expect("content");
    assert_eq!(ctx.focus().focused_id(), Some(content.borrow().id()));

    bottom.destroy(&mut ctx);
    assert!(ctx.dialogs().is_empty());
}

#[test]
fn config_write_while_dialog_is_borrowed_is_deferred() {
    let mut ctx = context(false);
    let dialog = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);

    {
        let _held = dialog.window().borrow();
        assert_eq!(ctx.config().set_bool(STATUS_ON_TOP, true), Ok(true));
        let report = ctx.bus().dispatch(&Notification::config_changed(STATUS_ON_TOP));
        assert_eq!(report.count(NotifyOutcome::Rejected), 1);
    }
    assert_eq!(
        dialog.child_kinds(),
        vec![WindowKind::Menu, WindowKind::StatusBar]
    );

    let rows = dialog.render(12, 3);
    assert_eq!(rows[0], " Aliases    ");
    assert_eq!(
        dialog.child_kinds(),
        vec![WindowKind::StatusBar, WindowKind::Menu]
    );

    dialog.destroy(&mut ctx);
}

#[test]
fn non_boolean_status_on_top_falls_back_to_bottom() {
    let mut ctx = context(true);
    ctx.config().register(STATUS_ON_TOP, ConfigValue::Str("yes".into()));

    let dialog = create_simple_index(&mut ctx, MenuKind::Alias, DialogKind::Alias, None);
    assert_eq!(
        dialog.child_kinds(),
        vec![WindowKind::Menu, WindowKind::StatusBar]
    );

    let report = ctx.bus().dispatch(&Notification::config_changed(STATUS_ON_TOP));
    assert_eq!(report.count(NotifyOutcome::Handled), 1);
    assert_eq!(
        dialog.child_kinds(),
        vec![WindowKind::Menu, WindowKind::StatusBar]
    );

    dialog.destroy(&mut ctx);
}

#[derive(Default)]
struct RecordingFactory {
    inner: DefaultWindowFactory,
    status_parents: Rc<RefCell<Vec<WindowKind>>>,
}

impl WindowFactory for RecordingFactory {
    fn menu_window(&mut self, ids: &mut WindowIds, menu: MenuKind) -> WindowRc {
        self.inner.menu_window(ids, menu)
    }

    fn status_window(&mut self, ids: &mut WindowIds, dialog: &WindowNode) -> WindowRc {
        self.status_parents.borrow_mut().push(dialog.kind());
        self.inner.status_window(ids, dialog)
    }
}

#[test]
fn custom_factory_sees_the_dialog_root() {
    let mut ctx = context(true);
    let mut factory = RecordingFactory::default();
    let parents = Rc::clone(&factory.status_parents);

    let dialog = create_simple_index_with(
        &mut ctx,
        &mut factory,
        MenuKind::Autocrypt,
        DialogKind::Autocrypt,
        None,
    );
    assert_eq!(
        *parents.borrow(),
        vec![WindowKind::Dialog(DialogKind::Autocrypt)]
    );
    assert_eq!(
        dialog.child_kinds(),
        vec![WindowKind::StatusBar, WindowKind::Menu]
    );
    dialog.destroy(&mut ctx);
}
