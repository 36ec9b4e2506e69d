use std::fs;
use std::path::Path;

use log::{debug, info};
use minijinja::{AutoEscape, Environment};

use crate::errors::WikiError;
use crate::types::Page;

const BUILTIN_VIEW: &str = include_str!("../../templates/view.html");
const BUILTIN_EDIT: &str = include_str!("../../templates/edit.html");

/// The two page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    View,
    Edit,
}

impl TemplateName {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::View => "view",
            TemplateName::Edit => "edit",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            TemplateName::View => "view.html",
            TemplateName::Edit => "edit.html",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            TemplateName::View => BUILTIN_VIEW,
            TemplateName::Edit => BUILTIN_EDIT,
        }
    }
}

/// Component for handling HTML template rendering
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Built-in templates only
    pub fn builtin() -> Result<Self, WikiError> {
        Self::load(None)
    }

    /// Load templates, preferring `view.html` / `edit.html` from `dir` when
    /// present and falling back to the built-in ones.
    pub fn load(dir: Option<&Path>) -> Result<Self, WikiError> {
        let mut env = Environment::new();
        // Everything is HTML regardless of template name.
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        for name in [TemplateName::View, TemplateName::Edit] {
            let source = match dir.map(|d| d.join(name.file_name())) {
                Some(path) if path.is_file() => {
                    info!("Loading template {:?} from {:?}", name.as_str(), path);
                    fs::read_to_string(&path)?
                }
                _ => {
                    debug!("Using built-in template {:?}", name.as_str());
                    name.builtin().to_string()
                }
            };
            env.add_template_owned(name.as_str(), source)?;
        }

        Ok(Self { env })
    }

    /// Render `page` with the named template.
    pub fn render(&self, name: TemplateName, page: &Page) -> Result<String, WikiError> {
        let template = self.env.get_template(name.as_str())?;
        Ok(template.render(page.context())?)
    }
}
