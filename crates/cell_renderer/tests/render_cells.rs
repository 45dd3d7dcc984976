// crates/cell_renderer/tests/render_cells.rs

use anyhow::Result;
use cell_renderer::{render, ContentKind, ImageContext, ImageStore, OutputFormat, RenderOptions, TRUNCATION_SUFFIX};
use chrono::NaiveDate;
use jupyter_notebook::Cell;
use serde_json::json;
use std::cell::RefCell;

fn cell(value: serde_json::Value) -> Cell {
    serde_json::from_value(value).expect("valid cell")
}

fn options(max: usize) -> RenderOptions {
    RenderOptions {
        output_format: OutputFormat::Markdown,
        max_output_size: max,
    }
}

fn code_cell_with(outputs: serde_json::Value) -> Cell {
    cell(json!({
        "cell_type": "code",
        "metadata": {},
        "source": ["print('hi')\n", "x"],
        "outputs": outputs
    }))
}

#[test]
fn code_is_source_verbatim() {
    let c = code_cell_with(json!([]));
    assert_eq!(render(&c, ContentKind::Code, &options(100), None).unwrap(), "print('hi')\nx");
}

#[test]
fn markdown_and_raw_cells() {
    let md = cell(json!({"cell_type": "markdown", "source": ["# A\n", "b"]}));
    assert_eq!(render(&md, ContentKind::Markdown, &options(100), None).unwrap(), "# A\nb");
    let raw = cell(json!({"cell_type": "raw", "source": "plain"}));
    assert_eq!(render(&raw, ContentKind::Raw, &options(100), None).unwrap(), "plain");
}

#[test]
fn mismatched_kind_is_an_error() {
    let md = cell(json!({"cell_type": "markdown", "source": "x"}));
    let err = render(&md, ContentKind::Code, &options(100), None).unwrap_err();
    assert_eq!(err.kind(), embed_error::ErrorKind::Mismatch);
    assert_eq!(err.to_string(), "Could not extract code from markdown cell");

    let other = cell(json!({"cell_type": "heading", "source": "x"}));
    assert!(render(&other, ContentKind::Raw, &options(100), None).is_err());
}

#[test]
fn outputs_concatenate_in_order() {
    let c = code_cell_with(json!([
        {"output_type": "stream", "name": "stdout", "text": ["hello\n"]},
        {"output_type": "execute_result", "execution_count": 1, "data": {"text/plain": ["42"]}, "metadata": {}},
        {"output_type": "error", "ename": "KeyError", "evalue": "'k'", "traceback": ["tb1", "tb2"]}
    ]));
    let out = render(&c, ContentKind::Output, &options(1000), None).unwrap();
    assert_eq!(out, "hello\n42Error: KeyError: 'k'\ntb1\ntb2");
}

#[test]
fn code_cell_without_outputs_renders_empty() {
    let c = code_cell_with(json!([]));
    assert_eq!(render(&c, ContentKind::Output, &options(10), None).unwrap(), "");
}

#[test]
fn long_output_is_truncated() {
    let c = code_cell_with(json!([
        {"output_type": "stream", "name": "stdout", "text": "0123456789abcdef"}
    ]));
    let out = render(&c, ContentKind::Output, &options(10), None).unwrap();
    assert_eq!(out, format!("0123456789{}", TRUNCATION_SUFFIX));
}

#[test]
fn text_plain_wins_over_image() {
    let c = code_cell_with(json!([
        {"output_type": "display_data", "metadata": {},
         "data": {"text/plain": "<Figure>", "image/png": "QUJD"}}
    ]));
    assert_eq!(render(&c, ContentKind::Output, &options(100), None).unwrap(), "<Figure>");
}

#[test]
fn images_and_html_in_markdown_format() {
    let c = code_cell_with(json!([
        {"output_type": "display_data", "metadata": {}, "data": {"image/png": "QUJD"}},
        {"output_type": "display_data", "metadata": {}, "data": {"text/html": ["<table>", "</table>"]}}
    ]));
    let out = render(&c, ContentKind::Output, &options(1000), None).unwrap();
    assert_eq!(
        out,
        "![](data:image/png;base64,QUJD)\n\n```html\n<table></table>\n```\n"
    );
}

#[test]
fn raw_format_skips_images_and_html() {
    let c = code_cell_with(json!([
        {"output_type": "display_data", "metadata": {}, "data": {"image/png": "QUJD"}},
        {"output_type": "display_data", "metadata": {}, "data": {"text/html": "<p/>"}},
        {"output_type": "stream", "name": "stdout", "text": "done"}
    ]));
    let opts = RenderOptions {
        output_format: OutputFormat::Raw,
        max_output_size: 1000,
    };
    assert_eq!(render(&c, ContentKind::Output, &opts, None).unwrap(), "done");
}

struct MemoryStore(RefCell<Vec<String>>);

impl ImageStore for MemoryStore {
    fn save(&self, path: &str, _bytes: &[u8]) -> Result<String> {
        self.0.borrow_mut().push(path.to_string());
        Ok(path.to_string())
    }
}

#[test]
fn saved_images_are_numbered_per_call() {
    let c = code_cell_with(json!([
        {"output_type": "display_data", "metadata": {}, "data": {"image/png": "QUJD"}},
        {"output_type": "stream", "name": "stdout", "text": "between\n"},
        {"output_type": "display_data", "metadata": {}, "data": {"image/png": ["QU", "JD"]}}
    ]));
    let store = MemoryStore(RefCell::new(Vec::new()));
    let ctx = ImageContext {
        store: &store,
        notebook_name: "My Notebook!",
        cell: "tag:fig",
        folder: "attachments",
        name_template: "img_{{notebook}}_{{cell}}_{{index}}",
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    };

    let out = render(&c, ContentKind::Output, &options(1000), Some(&ctx)).unwrap();
    assert_eq!(
        out,
        "![](attachments/img_My_Notebook__tag_fig_0.png)\nbetween\n![](attachments/img_My_Notebook__tag_fig_1.png)\n"
    );
    assert_eq!(store.0.borrow().len(), 2);

    // Same inputs, same output.
    let again = render(&c, ContentKind::Output, &options(1000), Some(&ctx)).unwrap();
    assert_eq!(out, again);
}
