use std::fs;
use std::path::PathBuf;

use snapname_naming::{apply_tag, make_unique, synthesize, ResultEditor, TagPosition};

fn docs_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("snapname_test_scenario_{name}"))
        .join("docs");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn thesis_prefix_on_free_name() {
    let docs = docs_dir("prefix_free");
    let notes = docs.join("notes.txt");
    fs::write(&notes, "draft").unwrap();

    let renamed = apply_tag(TagPosition::Prefix, "+Thesis+2024+", &notes).unwrap();

    assert_eq!(renamed, docs.join("Thesis+2024+notes.txt"));
    assert_eq!(fs::read_to_string(&renamed).unwrap(), "draft");
    assert!(!notes.exists());
}

#[test]
fn thesis_prefix_on_taken_name() {
    let docs = docs_dir("prefix_taken");
    let notes = docs.join("notes.txt");
    fs::write(&notes, "draft").unwrap();
    fs::write(docs.join("Thesis+2024+notes.txt"), "older").unwrap();

    let renamed = apply_tag(TagPosition::Prefix, "+Thesis+2024+", &notes).unwrap();

    assert_eq!(renamed, docs.join("Thesis+2024+notes (1).txt"));
    assert_eq!(
        fs::read_to_string(docs.join("Thesis+2024+notes.txt")).unwrap(),
        "older"
    );
}

#[test]
fn counters_strictly_increase_as_names_fill_up() {
    let docs = docs_dir("counters");
    let wanted = docs.join("Scan.png");
    fs::write(&wanted, "0").unwrap();

    let mut seen = Vec::new();
    for i in 1..=5 {
        let next = make_unique(&wanted);
        assert!(!next.exists());
        assert_eq!(next, docs.join(format!("Scan ({i}).png")));
        fs::write(&next, i.to_string()).unwrap();
        seen.push(next);
    }
    seen.dedup();
    assert_eq!(seen.len(), 5);
}

#[test]
fn recognized_invoice_text_renames_the_bound_file() {
    let docs = docs_dir("invoice");
    let source = docs.join("IMG_2041.pdf");
    fs::write(&source, "pdf").unwrap();

    let stem = synthesize("invoice   2023\nACME corp");
    assert_eq!(stem, "Invoice 2023 Acme Corp");

    let mut editor = ResultEditor::new(stem, Some(source));
    assert_eq!(editor.preview().as_deref(), Some("Invoice 2023 Acme Corp.pdf"));
    let renamed = editor.confirm_rename().unwrap();
    assert_eq!(renamed, docs.join("Invoice 2023 Acme Corp.pdf"));
}
