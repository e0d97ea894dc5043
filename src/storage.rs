use log::{debug, error, info, trace, warn};

use crate::{
    helper::{note_matches, require_text},
    next_id, now_millis, Category, Config, Note, NotesError, PersistenceAdapter, Result,
};

/// Owns the note collection and keeps durable storage in step with it.
///
/// The in-memory list is authoritative for the running session. Every
/// successful mutation writes the whole collection back through the adapter;
/// a failed write is logged and superseded by the next one.
pub struct NoteStore<A: PersistenceAdapter> {
    /// Durable storage backend
    adapter: A,

    /// Key the serialized collection lives under
    key: String,

    /// Notes, newest-created first
    notes: Vec<Note>,
}

impl<A: PersistenceAdapter> NoteStore<A> {
    /// Creates an empty store. Call [`NoteStore::load`] to restore saved notes.
    pub fn new(adapter: A, key: impl Into<String>) -> Self {
        Self {
            adapter,
            key: key.into(),
            notes: Vec::new(),
        }
    }

    pub fn from_config(adapter: A, config: &Config) -> Self {
        Self::new(adapter, config.storage_key.clone())
    }

    /// Replaces the collection with what the adapter holds.
    ///
    /// A missing blob is an empty collection. An unreadable or unparsable
    /// blob is logged and also treated as empty.
    ///
    /// # Returns
    ///
    /// The number of notes loaded
    pub async fn load(&mut self) -> usize {
        debug!("Loading notes from key {}", self.key);

        let blob = match self.adapter.read(&self.key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                info!("No stored notes under {}, starting empty", self.key);
                self.notes.clear();
                return 0;
            }
            Err(e) => {
                error!("Failed to read notes from storage, starting empty: {}", e);
                self.notes.clear();
                return 0;
            }
        };

        match serde_json::from_str::<Vec<Note>>(&blob) {
            Ok(notes) => {
                self.notes = notes;
                info!("Loaded {} notes", self.notes.len());
            }
            Err(e) => {
                error!(
                    "Stored notes under {} could not be parsed, starting empty: {}",
                    self.key, e
                );
                self.notes.clear();
            }
        }

        self.notes.len()
    }

    /// Serializes the whole collection and writes it through the adapter.
    pub async fn save(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.notes)?;
        trace!("Writing {} notes ({} bytes)", self.notes.len(), blob.len());
        self.adapter.write(&self.key, &blob).await
    }

    /// Best-effort save after a mutation. Failures never reach the caller.
    async fn persist_snapshot(&self) {
        match self.save().await {
            Ok(()) => debug!("Persisted {} notes", self.notes.len()),
            Err(e) => error!("Failed to persist notes, keeping in-memory state: {}", e),
        }
    }

    /// Creates a note and puts it at the front of the collection.
    ///
    /// # Errors
    ///
    /// [`NotesError::Validation`] if title or content is blank after
    /// trimming. The collection is untouched in that case.
    pub async fn create(&mut self, title: &str, content: &str, category: Category) -> Result<Note> {
        let title = require_text("title", title)?;
        let content = require_text("content", content)?;

        let now = now_millis();
        let id = next_id(now, |candidate| self.contains(candidate));
        let note = Note::new(id, title, content, category, now);

        self.notes.insert(0, note.clone());
        info!("Created note {}", note.id);

        self.persist_snapshot().await;
        Ok(note)
    }

    /// Replaces title, content and category of an existing note in place.
    ///
    /// The note keeps its id, creation time and position.
    ///
    /// # Errors
    ///
    /// [`NotesError::Validation`] for blank fields, [`NotesError::NoteNotFound`]
    /// for an unknown id. Neither changes the collection.
    pub async fn update(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        category: Category,
    ) -> Result<Note> {
        let title = require_text("title", title)?;
        let content = require_text("content", content)?;

        let note = match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => note,
            None => {
                warn!("Cannot update note {}: Note not found", id);
                return Err(NotesError::NoteNotFound { id: id.to_string() });
            }
        };

        note.revise(title, content, category, now_millis());
        let updated = note.clone();
        info!("Updated note {}", id);

        self.persist_snapshot().await;
        Ok(updated)
    }

    /// Removes the note with `id`. Absent ids are not an error.
    ///
    /// The collection is written back either way.
    ///
    /// # Returns
    ///
    /// Whether a note was removed
    pub async fn delete(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;

        if removed {
            info!("Deleted note {}", id);
        } else {
            debug!("Delete requested for unknown note {}", id);
        }

        self.persist_snapshot().await;
        removed
    }

    /// Notes whose title, content or category contains `query`, ignoring
    /// case, in collection order. An empty query yields every note.
    pub fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Note> + 'a {
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(move |note| note_matches(note, &needle))
    }

    /// The whole collection, newest-created first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notes.iter().any(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
