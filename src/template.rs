//! Template loading and rendering.
//!
//! Templates use Jinja2-style syntax through `tera`. Only the named template
//! and the templates it references through `{% extends %}`, `{% include %}`
//! and `{% import %}` are read, each resolved relative to the template's
//! directory. Other files next to the template are never touched.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tera::ast::Node;
use tera::{Context, Tera};

/// A template path split into the directory it's loaded from and its name
/// within that directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    pub dir: PathBuf,
    pub name: String,
}

impl TemplateRef {
    /// Split `path` into its directory and file name. An empty directory
    /// resolves to the current working directory.
    pub fn parse<P: AsRef<Path>>(path: P) -> Option<TemplateRef> {
        let path = path.as_ref();
        let name = path.file_name()?.to_str()?.to_string();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Some(TemplateRef { dir, name })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

#[derive(Debug)]
pub struct Template {
    reference: TemplateRef,
    tera: Tera,
}

impl Template {
    /// Load the template at `path`, along with the templates it references.
    pub fn load<P: AsRef<Path>>(path: P, autoescape: bool) -> Result<Template> {
        let path = path.as_ref();
        let reference = TemplateRef::parse(path).ok_or_else(|| Error::Template {
            template: path.to_path_buf(),
            source: tera::Error::msg("template path has no file name"),
        })?;
        let wrap = |source: tera::Error| Error::Template {
            template: reference.path(),
            source,
        };

        let files = collect_templates(&reference)?;
        let mut tera = Tera::default();
        if !autoescape {
            tera.autoescape_on(Vec::new());
        }
        tera.add_template_files(
            files
                .iter()
                .map(|name| (reference.dir.join(name), Some(name.as_str()))),
        )
        .map_err(wrap)?;

        log::debug!(
            "loaded template `{}` from {}",
            reference.name,
            reference.dir.display()
        );
        Ok(Template { reference, tera })
    }

    pub fn reference(&self) -> &TemplateRef {
        &self.reference
    }

    /// Substitute `data` into the template. `data` must serialise to a
    /// mapping; its keys become the template's variables.
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        let wrap = |source: tera::Error| Error::Template {
            template: self.reference.path(),
            source,
        };
        let context = Context::from_serialize(data).map_err(wrap)?;
        self.tera.render(&self.reference.name, &context).map_err(wrap)
    }
}

/// Walk the references of the named template, parsing each file once.
///
/// Optional includes (`ignore missing`) that don't exist are skipped.
fn collect_templates(reference: &TemplateRef) -> Result<Vec<String>> {
    let mut seen: HashSet<String> = HashSet::default();
    let mut files: Vec<String> = Vec::default();
    let mut pending: Vec<(String, bool)> = vec![(reference.name.clone(), false)];

    while let Some((name, optional)) = pending.pop() {
        if !seen.insert(name.clone()) {
            continue;
        }
        let path = reference.dir.join(&name);
        if optional && !path.is_file() {
            log::debug!("optional include `{name}` not found, skipping");
            continue;
        }

        let wrap = |source: tera::Error| Error::Template {
            template: path.clone(),
            source,
        };
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| wrap(tera::Error::chain(format!("failed to read `{name}`"), e)))?;
        let parsed =
            tera::Template::new(&name, Some(path.to_string_lossy().to_string()), &contents)
                .map_err(wrap)?;

        if let Some(parent) = &parsed.parent {
            pending.push((parent.clone(), false));
        }
        for (file, _) in parsed.imported_macro_files.iter() {
            pending.push((file.clone(), false));
        }
        collect_includes(&parsed.ast, &mut pending);
        files.push(name);
    }

    Ok(files)
}

fn collect_includes(nodes: &[Node], pending: &mut Vec<(String, bool)>) {
    for node in nodes {
        match node {
            Node::Include(_, names, ignore_missing) => {
                // with several candidates, the first one that exists is used
                let optional = *ignore_missing || names.len() > 1;
                pending.extend(names.iter().map(|name| (name.clone(), optional)));
            }
            Node::Block(_, block, _) => collect_includes(&block.body, pending),
            Node::MacroDefinition(_, definition, _) => {
                collect_includes(&definition.body, pending)
            }
            Node::FilterSection(_, section, _) => collect_includes(&section.body, pending),
            Node::Forloop(_, forloop, _) => {
                collect_includes(&forloop.body, pending);
                if let Some(body) = &forloop.empty_body {
                    collect_includes(body, pending);
                }
            }
            Node::If(branches, _) => {
                for (_, _, body) in branches.conditions.iter() {
                    collect_includes(body, pending);
                }
                if let Some((_, body)) = &branches.otherwise {
                    collect_includes(body, pending);
                }
            }
            _ => {}
        }
    }
}
