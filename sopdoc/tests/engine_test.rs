//! End-to-end tests over the content engine: editing, synchronization,
//! search and checklist progress working together.

use sopdoc::content_model::{
    BlockKind, ChecklistItem, ContentBlock, Document, Section, Tab,
};
use sopdoc::controller::SyncController;
use sopdoc::edit;
use sopdoc::progress::{ChecklistProgress, FileKv};
use sopdoc::render::ViewState;
use sopdoc::search;
use sopdoc::store::{MemoryStore, SopStore, StaticStore, StoreError};
use std::time::{SystemTime, UNIX_EPOCH};

fn technical_tab() -> Tab {
    Tab {
        id: "technical".to_string(),
        label: "Technical SOP".to_string(),
        icon: "wrench".to_string(),
        description: String::new(),
    }
}

fn technical_document() -> Document {
    let mut intro = Section::new("intro", "Intro", 1);
    intro.content.push(ContentBlock::Paragraph {
        content: "Hello world".to_string(),
    });
    Document {
        id: "doc-technical".to_string(),
        tab_id: "technical".to_string(),
        title: "Technical SOP".to_string(),
        description: String::new(),
        version: "1.0".to_string(),
        last_updated: "2026-08-30".to_string(),
        sections: vec![intro],
    }
}

fn seeded_controller() -> SyncController<MemoryStore> {
    let bundled = StaticStore::from_parts(vec![technical_tab()], vec![technical_document()]);
    let mut controller = SyncController::open(bundled, MemoryStore::new());
    controller.initialize().unwrap();
    controller
}

#[test]
fn add_then_delete_section_roundtrips() {
    let doc = technical_document();
    let added = edit::add_section(&doc, &[]).unwrap();
    let restored = edit::delete_section(&added, &[added.sections.len() - 1]).unwrap();
    assert_eq!(restored, doc);
}

#[test]
fn table_rows_stay_rectangular_under_column_edits() {
    let doc = technical_document();
    let mut doc = edit::add_block(&doc, &[0], BlockKind::Table).unwrap();
    for header in ["Owner", "Due", "Notes"] {
        doc = edit::add_table_column(&doc, &[0], 1, header).unwrap();
    }
    doc = edit::remove_table_column(&doc, &[0], 1, 2).unwrap();
    doc = edit::remove_table_column(&doc, &[0], 1, 0).unwrap();

    match &doc.sections[0].content[1] {
        ContentBlock::Table { headers, rows } => {
            assert_eq!(headers.len(), 2);
            for row in rows {
                assert_eq!(row.len(), headers.len());
            }
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn type_switch_keeps_content_only_for_text_kinds() {
    let doc = technical_document();

    let as_heading = edit::convert_block(&doc, &[0], 0, BlockKind::Heading).unwrap();
    assert_eq!(
        as_heading.sections[0].content[0],
        ContentBlock::Heading {
            content: "Hello world".to_string()
        }
    );

    let as_list = edit::convert_block(&doc, &[0], 0, BlockKind::List).unwrap();
    assert_eq!(
        as_list.sections[0].content[0],
        ContentBlock::List {
            items: vec![String::new()],
            ordered: false
        }
    );
}

#[test]
fn deleting_a_tab_cascades_everywhere() {
    let mut controller = seeded_controller();
    assert!(controller.document("technical").unwrap().is_some());

    controller.delete_tab("technical").unwrap();

    assert!(controller.tabs().is_empty());
    assert!(controller.document("technical").unwrap().is_none());
}

#[test]
fn search_is_deterministic_and_deduplicated() {
    let mut controller = seeded_controller();
    controller.load_all_documents().unwrap();

    let first = search::search("hello", controller.loaded_documents());
    let second = search::search("hello", controller.loaded_documents());
    assert_eq!(first, second);

    let mut keys: Vec<(String, String)> = first
        .iter()
        .map(|r| (r.tab_id.clone(), r.section_id.clone()))
        .collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), first.len());
}

#[test]
fn seeded_query_finds_the_intro_section() {
    let mut controller = seeded_controller();
    controller.load_all_documents().unwrap();

    let results = search::search("hello", controller.loaded_documents());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].section_id, "intro");
    assert_eq!(results[0].tab_id, "technical");
    assert!(results[0].matched_text.contains("Hello world"));
}

#[test]
fn search_result_navigation_expands_the_target() {
    let mut controller = seeded_controller();
    controller.load_all_documents().unwrap();
    let results = search::search("hello", controller.loaded_documents());

    let doc = controller.document("technical").unwrap().unwrap().clone();
    let mut view = ViewState::new();
    let anchor = view.reveal(&results[0], &doc);

    assert_eq!(anchor, "#intro");
    assert_eq!(view.active_tab(), Some("technical"));
    assert!(view.is_expanded("intro"));
}

#[test]
fn checklist_state_is_shared_across_documents() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("sopdoc-engine-{}.toml", nanos));

    let item = ChecklistItem {
        id: "c1".to_string(),
        text: "Deploy".to_string(),
        default_checked: false,
    };

    {
        let mut progress = ChecklistProgress::open(FileKv::new(&path));
        progress.toggle(&item.id, item.default_checked);
    }

    // A reopened store (fresh process) sees the same state, regardless of
    // which document the item is rendered in
    let mut progress = ChecklistProgress::open(FileKv::new(&path));
    assert!(progress.is_checked("c1", false));
    assert_eq!(progress.get().get("c1"), Some(&true));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn checked_by_default_item_toggles_to_unchecked() {
    let mut doc = technical_document();
    doc.sections[0].content.push(ContentBlock::Checklist {
        checklist_items: vec![ChecklistItem {
            id: "workspace-created".to_string(),
            text: "Workspace created".to_string(),
            default_checked: true,
        }],
    });

    // The toggle starts from the authored default, so the first toggle of
    // a checked-by-default item lands on unchecked
    let default = doc.checklist_default("workspace-created").unwrap();
    assert!(default);

    let mut progress = ChecklistProgress::open(sopdoc::progress::MemoryKv::new());
    assert!(progress.is_checked("workspace-created", default));
    progress.toggle("workspace-created", default);
    assert!(!progress.is_checked("workspace-created", default));
}

#[test]
fn failed_store_update_settles_on_fresh_fetch_value() {
    // A store that rejects writes but serves reads
    let mut failing = MemoryStore::new();
    failing.create_tab(technical_tab()).unwrap();
    failing.create_document(technical_document()).unwrap();
    failing.fail_writes = true;

    let bundled = StaticStore::from_parts(vec![technical_tab()], vec![technical_document()]);
    let mut controller = SyncController::open(bundled, failing);
    assert!(controller.is_initialized());

    let doc = controller.document("technical").unwrap().unwrap().clone();
    let edited = edit::add_section(&doc, &[]).unwrap();

    assert!(matches!(
        controller.update_document(edited),
        Err(StoreError::Unavailable(_))
    ));

    // The visible document equals what a fresh fetch returns
    let settled = controller.document("technical").unwrap().unwrap();
    assert_eq!(settled, &technical_document());
}

#[test]
fn static_mode_rejects_every_mutation() {
    let bundled = StaticStore::from_parts(vec![technical_tab()], vec![technical_document()]);
    let mut controller = SyncController::open(bundled, MemoryStore::new());
    assert!(!controller.is_initialized());

    // Reads work
    assert_eq!(controller.tabs().len(), 1);
    assert!(controller.document("technical").unwrap().is_some());

    // Writes are refused until initialize
    let doc = controller.document("technical").unwrap().unwrap().clone();
    assert_eq!(
        controller.update_document(doc).unwrap_err(),
        StoreError::NotInitialized
    );
    assert_eq!(
        controller.delete_tab("technical").unwrap_err(),
        StoreError::NotInitialized
    );
    assert_eq!(
        controller
            .reorder_tabs(&["technical".to_string()])
            .unwrap_err(),
        StoreError::NotInitialized
    );
}
