//! End-to-end builder session scenarios

use funnel_document::initial_document;
use funnel_editor::{
    JsonFileStore, Level, ManualClock, Mutation, SaveStatus, Session, SessionOptions,
    DEFAULT_SAVE_DEBOUNCE,
};

fn session_on_family_week() -> Session {
    let mut session = Session::new(initial_document(), SessionOptions::default());
    session.set_active(Level::LandingPage, Some("lp-family".to_string()));
    session.clear_selection_from(Level::Funnel);
    session
}

#[test]
fn test_create_funnel_then_undo() -> anyhow::Result<()> {
    let mut session = session_on_family_week();
    let d0 = session.document().clone();
    session.open_create_funnel();

    let created = session
        .create_funnel("Launch")?
        .expect("landing page is active");

    // D1: funnel appended with one empty page
    let lp = session.document().landing_page("lp-family").unwrap();
    assert_eq!(lp.funnels.len(), 1);
    let funnel = &lp.funnels[0];
    assert_eq!(funnel.id, created.funnel_id);
    assert_eq!(funnel.name, "Launch");
    assert_eq!(funnel.pages.len(), 1);
    assert_eq!(funnel.pages[0].id, created.page_id);
    assert!(funnel.pages[0].blocks.is_empty());

    assert_eq!(session.selection().funnel.as_deref(), Some(created.funnel_id.as_str()));
    assert_eq!(session.selection().page.as_deref(), Some(created.page_id.as_str()));
    assert_eq!(session.view().page.map(|p| p.id.as_str()), Some(created.page_id.as_str()));
    assert!(!session.ui().create_funnel_open);
    assert_eq!(session.history_len(), 2);
    assert!(session.can_undo());
    assert!(!session.can_redo());

    // Undo restores D0 but keeps the selection
    assert!(session.undo());
    assert_eq!(session.document(), &d0);
    assert!(session.document().landing_page("lp-family").unwrap().funnels.is_empty());
    assert_eq!(session.selection().funnel.as_deref(), Some(created.funnel_id.as_str()));
    assert_eq!(session.selection().page.as_deref(), Some(created.page_id.as_str()));
    assert!(session.view().funnel.is_none());
    assert!(session.view().page.is_none());

    // Blank name is ignored
    let before = session.document().clone();
    let len = session.history_len();
    assert_eq!(session.create_funnel("")?, None);
    assert_eq!(session.create_funnel("   ")?, None);
    assert_eq!(session.document(), &before);
    assert_eq!(session.history_len(), len);
    assert!(session.can_redo());

    Ok(())
}

#[test]
fn test_create_funnel_without_landing_page_is_noop() -> anyhow::Result<()> {
    let mut session = Session::new(initial_document(), SessionOptions::default());
    session.clear_selection_from(Level::LandingPage);

    assert_eq!(session.create_funnel("Launch")?, None);
    assert_eq!(session.history_len(), 1);

    // A stale landing page id counts as no landing page
    session.set_active(Level::LandingPage, Some("lp-inca".to_string()));
    assert_eq!(session.create_funnel("Launch")?, None);
    assert_eq!(session.history_len(), 1);

    Ok(())
}

#[test]
fn test_created_ids_are_unique() -> anyhow::Result<()> {
    let mut session = session_on_family_week();

    let first = session.create_funnel("One")?.unwrap();
    let second = session.create_funnel("Two")?.unwrap();

    let ids = [&first.funnel_id, &first.page_id, &second.funnel_id, &second.page_id];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    session.document().validate()?;
    Ok(())
}

#[test]
fn test_redo_after_new_funnel_is_gone() -> anyhow::Result<()> {
    let mut session = session_on_family_week();

    session.create_funnel("Draft")?;
    session.undo();
    assert!(session.can_redo());

    session.create_funnel("Final")?;
    assert!(!session.can_redo());

    let names: Vec<_> = session
        .document()
        .landing_page("lp-family")
        .unwrap()
        .funnels
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["Final".to_string()]);
    Ok(())
}

#[test]
fn test_stale_selection_after_delete_via_update() {
    let mut session = Session::new(initial_document(), SessionOptions::default());
    session.set_active(Level::Block, Some("block-form".to_string()));
    assert!(session.view().block.is_some());

    // Raw gateway edits do not know about selection
    session.update_in_place(|doc| {
        let page = doc.page_mut("page-early-home").unwrap();
        page.blocks.retain(|b| b.id != "block-form");
    });

    assert_eq!(session.selection().block.as_deref(), Some("block-form"));
    let view = session.view();
    assert!(view.block.is_none());
    assert_eq!(view.blocks.len(), 1);
}

#[test]
fn test_delete_funnel_cascades_selection() -> anyhow::Result<()> {
    let mut session = Session::new(initial_document(), SessionOptions::default());
    session.set_active(Level::Block, Some("block-hero".to_string()));

    session.apply(Mutation::DeleteFunnel {
        funnel_id: "funnel-early".to_string(),
    })?;

    let selection = session.selection();
    assert_eq!(selection.landing_page.as_deref(), Some("lp-summer"));
    assert_eq!(selection.funnel, None);
    assert_eq!(selection.page, None);
    assert_eq!(selection.block, None);

    // Undo brings the funnel back but not the selection
    session.undo();
    assert!(session.view().funnels.iter().any(|f| f.id == "funnel-early"));
    assert!(session.view().funnel.is_none());
    Ok(())
}

#[test]
fn test_edits_settle_into_json_store() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("funnels.json");
    let clock = ManualClock::new();

    let mut session = Session::open(JsonFileStore::new(&path), SessionOptions::default())?
        .with_clock(clock.clone());
    session.create_funnel("Spring Sale")?;
    assert_eq!(session.tick(), SaveStatus::Saving);
    assert!(!path.exists());

    clock.advance(DEFAULT_SAVE_DEBOUNCE);
    assert_eq!(session.tick(), SaveStatus::Saved);

    let reopened = Session::open(JsonFileStore::new(&path), SessionOptions::default())?;
    assert_eq!(reopened.document(), session.document());
    assert!(reopened.document().funnels().any(|f| f.name == "Spring Sale"));
    Ok(())
}

#[test]
fn test_history_limit_from_options() -> anyhow::Result<()> {
    let options = SessionOptions {
        history_limit: 2,
        ..SessionOptions::default()
    };
    let mut session = Session::new(initial_document(), options);

    for color in ["#111111", "#222222", "#333333"] {
        session.apply(Mutation::SetChainColor {
            chain_id: "chain-andes".to_string(),
            color: color.to_string(),
        })?;
    }

    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.document().chain("chain-andes").unwrap().primary_color, "#111111");
    Ok(())
}
