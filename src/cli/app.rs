//! CLI module for the webnotes application
//!
//! Terminal front end over the note store. It owns prompts and output; all
//! note rules live in [`NoteStore`].
use std::io::{stdin, stdout, Write};

use chrono::Local;
use console::Style;
use log::info;

use crate::{
    content_preview, Category, Commands, Config, Note, NoteStore, NotesError, PersistenceAdapter,
    Result,
};

/// CLI Application handler - processes CLI commands against a NoteStore
pub struct App<A: PersistenceAdapter> {
    /// The note store, already loaded
    store: NoteStore<A>,

    /// Application configuration
    config: Config,
}

impl<A: PersistenceAdapter> App<A> {
    /// Create a new CLI application with the given store and config
    pub fn new(store: NoteStore<A>, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &NoteStore<A> {
        &self.store
    }

    /// Run the CLI application with the given command
    pub async fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Create {
                title,
                content,
                category,
            } => {
                let category = category.unwrap_or(self.config.default_category);
                let note = self.store.create(&title, &content, category).await?;
                println!("Note created with ID: {}", note.id);
            }

            Commands::Edit {
                id,
                title,
                content,
                category,
            } => {
                let note = self.apply_edit(&id, title, content, category).await?;
                println!("Note {} updated successfully", note.id);
            }

            Commands::Delete { id, force } => self.handle_delete(&id, force).await?,

            Commands::List { limit, json } => {
                let notes = limit_notes(self.store.filter(""), limit);
                if notes.is_empty() && !json {
                    println!("Your web is empty. Create your first note!");
                } else {
                    display_notes(&notes, json)?;
                }
            }

            Commands::Search { query, limit, json } => {
                let notes = limit_notes(self.store.filter(&query), limit);
                if notes.is_empty() && !json {
                    println!("No web notes found matching \"{}\"", query);
                } else {
                    display_notes(&notes, json)?;
                }
            }

            Commands::Categories => {
                for category in Category::ALL {
                    let marker = if category == self.config.default_category {
                        " (default)"
                    } else {
                        ""
                    };
                    println!("{}{}", category_style(category).apply_to(category), marker);
                }
            }
        }

        Ok(())
    }

    /// Edits a note, keeping current values for anything not supplied.
    async fn apply_edit(
        &mut self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
        category: Option<Category>,
    ) -> Result<Note> {
        let current = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| NotesError::NoteNotFound { id: id.to_string() })?;

        let title = title.unwrap_or(current.title);
        let content = content.unwrap_or(current.content);
        let category = category.unwrap_or(current.category);

        self.store.update(id, &title, &content, category).await
    }

    async fn handle_delete(&mut self, id: &str, force: bool) -> Result<()> {
        let note = match self.store.get(id) {
            Some(note) => note.clone(),
            None => {
                println!("Note {} not found, nothing deleted.", id);
                return Ok(());
            }
        };

        if !force && self.config.confirm_delete && !confirm_deletion(&note)? {
            println!("Deletion cancelled.");
            return Ok(());
        }

        self.store.delete(id).await;
        info!("Note {} deleted from CLI", id);
        println!(
            "Note '{}' ({}) has been permanently deleted.",
            note.title, note.id
        );

        Ok(())
    }
}

/// Shows the note and asks for a yes/no answer on stdin.
fn confirm_deletion(note: &Note) -> Result<bool> {
    println!("You are about to delete the following note:");
    println!("{}", render_note(note));

    println!("\nThis action cannot be undone!");
    print!("Are you sure you want to delete this web note? [y/N]: ");
    stdout().flush().map_err(NotesError::Io)?;

    let mut input = String::new();
    stdin().read_line(&mut input).map_err(NotesError::Io)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

fn limit_notes<'a>(notes: impl Iterator<Item = &'a Note>, limit: usize) -> Vec<&'a Note> {
    if limit == 0 {
        notes.collect()
    } else {
        notes.take(limit).collect()
    }
}

fn display_notes(notes: &[&Note], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }

    let term_width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80);

    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            println!("{}", "-".repeat(term_width.min(50)));
        }
        println!("{}", render_note(note));
    }

    println!(
        "\nFound {} note{}",
        notes.len(),
        if notes.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Card-style text block for one note.
pub fn render_note(note: &Note) -> String {
    let updated = note.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
    let mut out = format!(
        "ID: {} | Updated: {}\nTitle: {}\nCategory: {}",
        note.id,
        updated,
        console::style(&note.title).bold(),
        category_style(note.category).apply_to(note.category)
    );

    let preview = content_preview(&note.content, 100);
    if !preview.is_empty() {
        out.push_str("\n\n");
        out.push_str(&preview);
    }
    out
}

/// Accent color for a category label.
pub fn category_style(category: Category) -> Style {
    match category {
        Category::DailyBugle => Style::new().red(),
        Category::WebShooters => Style::new().blue(),
        Category::SpideySense => Style::new().yellow(),
        Category::HeroWork => Style::new().red().bold(),
        Category::Personal => Style::new().cyan(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryAdapter;

    fn app() -> App<MemoryAdapter> {
        let config = Config {
            confirm_delete: false,
            default_category: Category::SpideySense,
            ..Config::default()
        };
        let store = NoteStore::from_config(MemoryAdapter::new(), &config);
        App::new(store, config)
    }

    #[tokio::test]
    async fn create_uses_configured_default_category() {
        let mut app = app();
        app.run(Commands::Create {
            title: "Tingle".to_string(),
            content: "Something is off downtown".to_string(),
            category: None,
        })
        .await
        .unwrap();

        assert_eq!(app.store().notes()[0].category, Category::SpideySense);
    }

    #[tokio::test]
    async fn edit_keeps_fields_that_were_not_given() {
        let mut app = app();
        app.run(Commands::Create {
            title: "Patrol Log".to_string(),
            content: "Checked the bridge".to_string(),
            category: Some(Category::HeroWork),
        })
        .await
        .unwrap();
        let id = app.store().notes()[0].id.clone();

        app.run(Commands::Edit {
            id: id.clone(),
            title: Some("Patrol Log v2".to_string()),
            content: None,
            category: None,
        })
        .await
        .unwrap();

        let note = app.store().get(&id).unwrap();
        assert_eq!(note.title, "Patrol Log v2");
        assert_eq!(note.content, "Checked the bridge");
        assert_eq!(note.category, Category::HeroWork);
    }

    #[tokio::test]
    async fn edit_unknown_note_is_not_found() {
        let mut app = app();
        let result = app
            .run(Commands::Edit {
                id: "nope".to_string(),
                title: None,
                content: None,
                category: None,
            })
            .await;
        assert!(matches!(result, Err(NotesError::NoteNotFound { .. })));
    }

    #[tokio::test]
    async fn delete_without_confirmation_when_disabled() {
        let mut app = app();
        app.run(Commands::Create {
            title: "Groceries".to_string(),
            content: "Milk and eggs".to_string(),
            category: Some(Category::Personal),
        })
        .await
        .unwrap();
        let id = app.store().notes()[0].id.clone();

        app.run(Commands::Delete {
            id: "unknown".to_string(),
            force: false,
        })
        .await
        .unwrap();
        assert_eq!(app.store().len(), 1);

        app.run(Commands::Delete { id, force: false }).await.unwrap();
        assert!(app.store().is_empty());
    }

    #[test]
    fn render_note_shows_title_category_and_preview() {
        console::set_colors_enabled(false);
        let note = Note::new(
            "1".to_string(),
            "Groceries".to_string(),
            "Milk and eggs\nand bread".to_string(),
            Category::Personal,
            chrono::Utc::now(),
        );

        let text = render_note(&note);
        assert!(text.contains("Title: Groceries"));
        assert!(text.contains("Category: Personal"));
        assert!(text.ends_with("Milk and eggs"));
    }

    #[test]
    fn limit_zero_means_everything() {
        let notes: Vec<Note> = (0..3)
            .map(|i| {
                Note::new(
                    i.to_string(),
                    "t".to_string(),
                    "c".to_string(),
                    Category::Personal,
                    chrono::Utc::now(),
                )
            })
            .collect();

        assert_eq!(limit_notes(notes.iter(), 0).len(), 3);
        assert_eq!(limit_notes(notes.iter(), 2).len(), 2);
    }
}
