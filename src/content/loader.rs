//! Content loading from disk.
//!
//! ```text
//! <root>/<locale>/strings.toml            string catalog
//! <root>/<locale>/<section>/<path>.md     category = section, slug = path
//! <root>/<locale>/docs/<cat>/<path>.md    category = docs/<cat>, slug = path
//! ```
//!
//! Documents are Markdown with optional TOML front matter fenced by `+++`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};

use pulldown_cmark::{html, Options, Parser};
use walkdir::WalkDir;

use crate::content::document::ContentDocument;
use crate::content::store::ContentStore;
use crate::content::ContentError;
use crate::locale::LocaleSet;

/// Sections whose second path level is part of the category key.
const NESTED_SECTIONS: &[&str] = &["docs"];

const STRINGS_FILE: &str = "strings.toml";
const FRONT_MATTER_FENCE: &str = "+++";

/// Load every supported locale under `root` into a fresh snapshot.
///
/// Directories that are not supported locales are skipped with a warning.
pub fn load_store(root: &Path, locales: &LocaleSet) -> Result<ContentStore, ContentError> {
    let mut store = ContentStore::new(locales.clone());

    let entries = fs::read_dir(root).map_err(|source| ContentError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ContentError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(locale) = locales.canonical(&name) else {
            tracing::warn!(directory = %path.display(), "Skipping content for unsupported locale");
            continue;
        };
        load_locale(&mut store, &path, locale)?;
    }

    tracing::info!(
        root = %root.display(),
        documents = store.document_count(),
        "Content loaded"
    );
    Ok(store)
}

fn load_locale(store: &mut ContentStore, dir: &Path, locale: &str) -> Result<(), ContentError> {
    let strings_path = dir.join(STRINGS_FILE);
    if strings_path.is_file() {
        let catalog = load_strings(&strings_path)?;
        store.set_strings(locale, catalog)?;
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ContentError::Walk {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let Some((category, slug)) = split_content_path(relative) else {
            tracing::debug!(path = %path.display(), "Ignoring document outside a section");
            continue;
        };

        let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = parse_document(&source, &category, &slug, locale).map_err(|e| match e {
            ContentError::Toml { message, .. } => ContentError::Toml {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        store.insert(doc)?;
    }
    Ok(())
}

/// Split a locale-relative path into (category, slug).
///
/// Returns `None` for files sitting directly in the locale directory.
pub fn split_content_path(relative: &Path) -> Option<(String, String)> {
    let segments: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.len() < 2 {
        return None;
    }
    let section = segments[0].as_str();
    let depth = if NESTED_SECTIONS.contains(&section) && segments.len() > 2 {
        2
    } else {
        1
    };
    Some((segments[..depth].join("/"), segments[depth..].join("/")))
}

/// Parse a document's front matter and render its Markdown body.
pub fn parse_document(
    source: &str,
    category: &str,
    slug: &str,
    locale: &str,
) -> Result<ContentDocument, ContentError> {
    let (front, body) = split_front_matter(source);
    let table = match front {
        Some(text) => toml::from_str::<toml::Table>(text).map_err(|e| ContentError::Toml {
            path: Default::default(),
            message: e.to_string(),
        })?,
        None => toml::Table::new(),
    };

    let mut title = slug.rsplit('/').next().unwrap_or(slug).to_string();
    let mut slug = slug.to_string();
    let mut weight = 0;
    let mut metadata = BTreeMap::new();

    for (key, value) in table {
        match (key.as_str(), &value) {
            ("title", toml::Value::String(s)) => title = s.clone(),
            ("slug", toml::Value::String(s)) => slug = s.clone(),
            ("weight", toml::Value::Integer(w)) => weight = *w,
            _ => {
                if let Some(text) = scalar_to_string(&value) {
                    metadata.insert(key.clone(), text);
                }
            }
        }
    }

    Ok(ContentDocument {
        slug,
        category: category.to_string(),
        title,
        body: render_markdown(body),
        locale: locale.to_string(),
        metadata,
        weight,
    })
}

fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let trimmed = source.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed.strip_prefix(FRONT_MATTER_FENCE) else {
        return (None, source);
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return (None, source);
    };
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, source)
}

fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        _ => None,
    }
}

fn load_strings(path: &Path) -> Result<BTreeMap<String, String>, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = toml::from_str::<toml::Table>(&text).map_err(|e| ContentError::Toml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut catalog = BTreeMap::new();
    flatten_strings("", &table, &mut catalog);
    Ok(catalog)
}

fn flatten_strings(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten_strings(&full, nested, out),
            other => {
                if let Some(text) = scalar_to_string(other) {
                    out.insert(full, text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_split_content_path() {
        assert_eq!(
            split_content_path(Path::new("apps/slack.md")),
            Some(("apps".into(), "slack".into()))
        );
        assert_eq!(
            split_content_path(Path::new("docs/api/browser/window.md")),
            Some(("docs/api".into(), "browser/window".into()))
        );
        assert_eq!(
            split_content_path(Path::new("docs/faq.md")),
            Some(("docs".into(), "faq".into()))
        );
        assert_eq!(
            split_content_path(Path::new("userland/guides/intro.md")),
            Some(("userland".into(), "guides/intro".into()))
        );
        assert_eq!(split_content_path(Path::new("readme.md")), None);
    }

    #[test]
    fn test_parse_document_front_matter() {
        let source = "+++\ntitle = \"Slack\"\nweight = 3\ndescription = \"Chat\"\nfeatured = true\n+++\n# Hello\n\nBody text.\n";
        let doc = parse_document(source, "apps", "slack", "en-US").unwrap();
        assert_eq!(doc.title, "Slack");
        assert_eq!(doc.weight, 3);
        assert_eq!(doc.meta("description"), Some("Chat"));
        assert_eq!(doc.meta("featured"), Some("true"));
        assert!(doc.body.contains("<h1>Hello</h1>"));
        assert!(doc.body.contains("<p>Body text.</p>"));
    }

    #[test]
    fn test_parse_document_without_front_matter() {
        let doc = parse_document("plain *text*", "userland", "guides/intro", "en-US").unwrap();
        assert_eq!(doc.title, "intro");
        assert_eq!(doc.slug, "guides/intro");
        assert_eq!(doc.body.trim(), "<p>plain <em>text</em></p>");
    }

    #[test]
    fn test_parse_document_rejects_bad_front_matter() {
        let err = parse_document("+++\ntitle = \n+++\n", "apps", "x", "en-US").unwrap_err();
        assert!(matches!(err, ContentError::Toml { .. }));
    }

    #[test]
    fn test_load_store_from_disk() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "en-US/apps/slack.md", "+++\ntitle = \"Slack\"\n+++\nChat app.");
        write(root, "en-US/docs/api/app.md", "+++\ntitle = \"app\"\n+++\nLifecycle.");
        write(root, "en-US/strings.toml", "[nav]\ndocs = \"Docs\"\n");
        write(root, "fr-FR/apps/slack.md", "+++\ntitle = \"Slack (fr)\"\n+++\nDiscussion.");
        write(root, "fr-FR/strings.toml", "[nav]\ndocs = \"Documentation\"\n");
        write(root, "xx-XX/apps/ghost.md", "ignored");
        write(root, "en-US/notes.txt", "ignored");

        let locales = LocaleSet::new(["en-US", "fr-FR"], "en-US").unwrap();
        let store = load_store(root, &locales).unwrap();

        assert_eq!(store.document_count(), 3);
        assert_eq!(store.lookup("apps", "slack", "fr-FR").unwrap().title, "Slack (fr)");
        assert_eq!(store.lookup("docs/api", "app", "fr-FR").unwrap().locale, "en-US");
        assert_eq!(store.strings("fr-FR")["nav.docs"], "Documentation");
        assert!(store.lookup("apps", "ghost", "en-US").is_none());
    }

    #[test]
    fn test_load_store_reports_duplicate_slug() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "en-US/apps/a.md", "+++\nslug = \"same\"\n+++\n");
        write(root, "en-US/apps/b.md", "+++\nslug = \"same\"\n+++\n");

        let locales = LocaleSet::new(["en-US"], "en-US").unwrap();
        let err = load_store(root, &locales).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_load_store_missing_root() {
        let locales = LocaleSet::new(["en-US"], "en-US").unwrap();
        let err = load_store(Path::new("/definitely/not/here"), &locales).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
