//! Persisted editor state.
//!
//! The export core never touches storage; the session is loaded at startup,
//! handed to the controller as an [`ExportRequest`], and saved explicitly.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::ExportRequest;
use crate::template::{default_template, find_template};

pub const CONTENT_KEY: &str = "resumeEdit_content";
pub const TEMPLATE_KEY: &str = "resumeEdit_template";
pub const FILE_NAME_KEY: &str = "resumeEdit_fileName";

pub const DEFAULT_FILE_NAME: &str = "my-resume";

/// Sample resume shown to first-time users.
pub const DEFAULT_RESUME_CONTENT: &str = r#"
<h1>John Doe</h1>
<p>Front-end Developer | john.doe@email.com | (123) 456-7890</p>
<h2>SUMMARY</h2>
<p>Experienced front-end developer with expertise in React, JavaScript, and modern web technologies.</p>
<h2>EXPERIENCE</h2>
<h3>Senior Front-end Developer | ABC Company | 2018 - Present</h3>
<ul>
  <li>Developed responsive web applications using React and TypeScript</li>
  <li>Implemented state management with Redux and Context API</li>
  <li>Collaborated with UI/UX designers to create intuitive user interfaces</li>
</ul>
<h3>Front-end Developer | XYZ Inc | 2015 - 2018</h3>
<ul>
  <li>Built interactive web applications using JavaScript and jQuery</li>
  <li>Optimized website performance and accessibility</li>
  <li>Participated in agile development processes</li>
</ul>
<h2>EDUCATION</h2>
<p>Bachelor of Science in Computer Science | University of Technology | 2015</p>
<h2>SKILLS</h2>
<p>JavaScript, React, TypeScript, HTML, CSS, Redux, Git, Node.js, Webpack</p>
"#;

/// String key/value store, in the manner of browser local storage.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Volatile storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Storage backed by a JSON object file.
///
/// Changes stay in memory until [`flush`](Self::flush).
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open a storage file; a missing file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no storage file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all entries back to the file.
    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The editor's current content, template and file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub content: String,
    pub template_id: String,
    pub file_name: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            content: DEFAULT_RESUME_CONTENT.to_string(),
            template_id: default_template().id.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl Session {
    /// Restore a session; missing or empty entries keep their defaults.
    pub fn load(storage: &dyn Storage) -> Self {
        let mut session = Self::default();
        let saved = |key| storage.get(key).filter(|v: &String| !v.is_empty());

        if let Some(content) = saved(CONTENT_KEY) {
            session.content = content;
        }
        if let Some(template) = saved(TEMPLATE_KEY) {
            if !session.select_template(&template) {
                log::warn!("stored template {template:?} is not available");
            }
        }
        if let Some(file_name) = saved(FILE_NAME_KEY) {
            session.file_name = file_name;
        }
        session
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        storage.set(CONTENT_KEY, self.content.clone());
        storage.set(TEMPLATE_KEY, self.template_id.clone());
        storage.set(FILE_NAME_KEY, self.file_name.clone());
    }

    /// Replace the content with the sample resume.
    pub fn reset_content(&mut self) {
        self.content = DEFAULT_RESUME_CONTENT.to_string();
    }

    /// Select a registered template; unknown ids are rejected.
    pub fn select_template(&mut self, id: &str) -> bool {
        match find_template(id) {
            Some(template) => {
                self.template_id = template.id.to_string();
                true
            }
            None => false,
        }
    }

    pub fn export_request(&self) -> ExportRequest {
        ExportRequest::new(
            self.content.clone(),
            self.template_id.clone(),
            self.file_name.clone(),
        )
    }
}
