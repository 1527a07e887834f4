//! In-memory [`World`] for compiling the report template.
//!
//! The template is the only source file. Fonts come from `typst-assets`
//! and are loaded once per process.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Array, Bytes, Datetime, Dict, Value};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use log::debug;
use typst::{Library, World};

static FONTS: OnceLock<FontCache> = OnceLock::new();

pub(crate) struct FontCache {
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
}

impl FontCache {
    fn load() -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        for data in typst_assets::fonts() {
            for font in Font::iter(Bytes::from_static(data)) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }

        debug!("Loaded {} embedded fonts", fonts.len());
        Self {
            book: LazyHash::new(book),
            fonts,
        }
    }

    pub(crate) fn global() -> &'static FontCache {
        FONTS.get_or_init(FontCache::load)
    }
}

pub(crate) struct ReportWorld {
    main: Source,
    library: LazyHash<Library>,
    fonts: &'static FontCache,
    today: NaiveDate,
}

impl ReportWorld {
    /// `inputs` must be a JSON object; it becomes `sys.inputs`.
    pub(crate) fn new(template: &str, inputs: &serde_json::Value, today: NaiveDate) -> Self {
        let id = FileId::new(None, VirtualPath::new("/main.typ"));
        let inputs = match json_to_value(inputs) {
            Value::Dict(dict) => dict,
            _ => Dict::new(),
        };

        Self {
            main: Source::new(id, template.to_string()),
            library: LazyHash::new(Library::builder().with_inputs(inputs).build()),
            fonts: FontCache::global(),
            today,
        }
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.fonts.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        Datetime::from_ymd(
            self.today.year(),
            self.today.month() as u8,
            self.today.day() as u8,
        )
    }
}

fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or_default()),
        },
        serde_json::Value::String(s) => Value::Str(s.as_str().into()),
        serde_json::Value::Array(items) => {
            let items: Vec<Value> = items.iter().map(json_to_value).collect();
            Value::Array(Array::from(items.as_slice()))
        }
        serde_json::Value::Object(map) => {
            let mut dict = Dict::new();
            for (key, value) in map {
                dict.insert(key.as_str().into(), json_to_value(value));
            }
            Value::Dict(dict)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
    }

    #[test]
    fn test_fonts_are_embedded() {
        let cache = FontCache::global();
        assert!(!cache.fonts.is_empty());
        assert!(std::ptr::eq(cache, FontCache::global()));
    }

    #[test]
    fn test_main_source_is_the_template() {
        let world = ReportWorld::new("Hello", &json!({}), date());
        let source = world.source(world.main()).unwrap();
        assert_eq!(source.text(), "Hello");

        let other = FileId::new(None, VirtualPath::new("/other.typ"));
        assert!(world.source(other).is_err());
        assert!(world.file(other).is_err());
    }

    #[test]
    fn test_today_is_the_export_date() {
        let world = ReportWorld::new("", &json!({}), date());
        assert_eq!(world.today(None), Datetime::from_ymd(2025, 1, 9));
    }

    #[test]
    fn test_nested_inputs_convert() {
        let value = json_to_value(&json!({
            "title": "Report",
            "rows": [{ "label": "Size", "value": "95 sq.m." }],
            "pages": 2,
            "draft": false,
            "notes": null
        }));
        let Value::Dict(dict) = value else {
            panic!("expected a dict");
        };
        assert!(dict.contains("rows"));
        assert_eq!(dict.get("pages").ok(), Some(&Value::Int(2)));
        assert_eq!(dict.get("notes").ok(), Some(&Value::None));
    }
}
