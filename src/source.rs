// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Suppliers of raw specification documents.

use std::{fs, io, path::Path, sync::Arc};

use async_trait::async_trait;
use derive_more::{Display, Error};
use linked_hash_map::LinkedHashMap;

/// Supplier of raw document text given its path.
#[async_trait(?Send)]
pub trait Source {
    /// Expands the given `path` into the paths of the documents it denotes.
    ///
    /// Default implementation denotes exactly the given `path`.
    ///
    /// # Errors
    ///
    /// If the `path` cannot be expanded.
    fn expand(&self, path: &str) -> Result<Vec<String>, Error> {
        Ok(vec![path.to_owned()])
    }

    /// Retrieves the text of the document at the given `path`.
    ///
    /// # Errors
    ///
    /// If the document cannot be retrieved.
    async fn fetch(&self, path: &str) -> Result<String, Error>;
}

/// Error of retrieving a document.
#[derive(Clone, Debug, Display, Error)]
pub enum Error {
    /// Reading failed.
    #[display(fmt = "`{}`: {}", path, source)]
    Io {
        /// Path of the document.
        path: String,

        /// Underlying error.
        source: Arc<io::Error>,
    },

    /// No document at the path.
    #[display(fmt = "`{}`: no such document", path)]
    NotFound {
        /// Path of the document.
        path: String,
    },

    /// Directory couldn't be walked.
    #[display(fmt = "`{}`: {}", path, message)]
    Walk {
        /// Path of the directory.
        path: String,

        /// Description of the failure.
        message: String,
    },
}

impl Error {
    /// Returns the path this [`Error`] relates to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Io { path, .. }
            | Self::NotFound { path }
            | Self::Walk { path, .. } => path,
        }
    }
}

/// Filesystem [`Source`].
///
/// A directory path is expanded into every `*.feature` file below it
/// (case-insensitively), in sorted order.
///
/// As there is no async runtime-agnostic way to interact with io, this
/// [`Source`] is blocking.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fs;

#[async_trait(?Send)]
impl Source for Fs {
    fn expand(&self, path: &str) -> Result<Vec<String>, Error> {
        if !Path::new(path).is_dir() {
            return Ok(vec![path.to_owned()]);
        }

        let walker = globwalk::GlobWalkerBuilder::new(path, "*.feature")
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::Walk {
                path: path.to_owned(),
                message: e.to_string(),
            })?;

        let mut files = walker
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().display().to_string())
            .collect::<Vec<_>>();
        files.sort();
        Ok(files)
    }

    async fn fetch(&self, path: &str) -> Result<String, Error> {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::NotFound {
                    path: path.to_owned(),
                }
            } else {
                Error::Io {
                    path: path.to_owned(),
                    source: Arc::new(e),
                }
            }
        })
    }
}

/// In-memory [`Source`], keeping documents in insertion order.
///
/// A path followed by `/` denotes every document below it, like a
/// directory.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    documents: LinkedHashMap<String, String>,
}

impl Memory {
    /// Creates an empty [`Memory`] source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the `text` of a document at the given `path`.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Adds the `text` of a document at the given `path`, replacing any
    /// previous one.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        _ = self.documents.insert(path.into(), text.into());
    }

    /// Returns the number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Checks whether no documents are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait(?Send)]
impl Source for Memory {
    fn expand(&self, path: &str) -> Result<Vec<String>, Error> {
        if self.documents.contains_key(path) {
            return Ok(vec![path.to_owned()]);
        }

        let prefix = format!("{}/", path.trim_end_matches('/'));
        let below = self
            .documents
            .keys()
            .filter(|p| p.starts_with(&prefix))
            .cloned()
            .collect::<Vec<_>>();
        Ok(if below.is_empty() {
            vec![path.to_owned()]
        } else {
            below
        })
    }

    async fn fetch(&self, path: &str) -> Result<String, Error> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                path: path.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{Error, Fs, Memory, Source as _};

    #[tokio::test]
    async fn memory_fetches_stored_documents() {
        let src = Memory::new().with("a.feature", "Feature: A");

        assert_eq!(src.fetch("a.feature").await.unwrap(), "Feature: A");
        assert!(matches!(
            src.fetch("b.feature").await,
            Err(Error::NotFound { path }) if path == "b.feature",
        ));
    }

    #[test]
    fn memory_expands_directories() {
        let src = Memory::new()
            .with("specs/b.feature", "")
            .with("other/c.feature", "")
            .with("specs/a.feature", "");

        assert_eq!(
            src.expand("specs/").unwrap(),
            ["specs/b.feature", "specs/a.feature"],
        );
        assert_eq!(src.expand("specs/a.feature").unwrap(), ["specs/a.feature"]);
        assert_eq!(src.expand("missing").unwrap(), ["missing"]);
        assert_eq!(src.len(), 3);
    }

    #[tokio::test]
    async fn fs_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("calc.feature");
        fs::write(&file, "Feature: Calc\n").unwrap();
        let path = file.display().to_string();

        assert_eq!(Fs.fetch(&path).await.unwrap(), "Feature: Calc\n");

        let missing = dir.path().join("nope.feature").display().to_string();
        let err = Fs.fetch(&missing).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }), "{err}");
        assert_eq!(err.path(), missing);
    }

    #[test]
    fn fs_expands_directories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.feature"), "").unwrap();
        fs::write(dir.path().join("A.FEATURE"), "").unwrap();
        fs::write(dir.path().join("nested").join("c.feature"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let root = dir.path().display().to_string();
        let found = Fs.expand(&root).unwrap();

        let names = found
            .iter()
            .map(|p| p.strip_prefix(&root).unwrap().replace('\\', "/"))
            .collect::<Vec<_>>();
        assert_eq!(names, ["/A.FEATURE", "/b.feature", "/nested/c.feature"]);

        let single = dir.path().join("b.feature").display().to_string();
        assert_eq!(Fs.expand(&single).unwrap(), [single.clone()]);
    }
}
