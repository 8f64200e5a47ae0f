use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use log::{debug, info};

use crate::{
    AppState, Commands, Config, DayCount, KeyValueStore, Note, NoteId, NoteboardError,
    Position, Result, SubmitOutcome,
};

/// CLI Application handler - applies one command to the application state
pub struct App<S: KeyValueStore> {
    /// Session, notes and controllers
    state: AppState<S>,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new CLI application over the given store and config
    pub fn new(store: S, config: Config, verbose: bool) -> Result<Self> {
        let state = AppState::load(store, &config)?;
        Ok(Self {
            state,
            config,
            verbose,
        })
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { username, password } => self.handle_login(&username, &password)?,

            Commands::Logout => {
                self.state.logout()?;
                println!("Logged out.");
            }

            Commands::Status => self.handle_status(),

            Commands::Create {
                title,
                content,
                color,
                tags,
            } => self.handle_create(title, content, color, tags)?,

            Commands::Edit {
                id,
                title,
                content,
                color,
                tags,
            } => self.handle_edit(id, title, content, color, tags)?,

            Commands::Delete { id, force } => self.handle_delete(id, force)?,

            Commands::Comment { id, text } => self.handle_comment(id, text)?,

            Commands::Move { id, x, y } => {
                self.state.note(id)?;
                self.state.reposition(id, x, y)?;
                println!("Note {} moved to ({}, {}).", id, x, y);
                self.warn_if_off_canvas(id, Position::new(x, y));
            }

            Commands::Drop {
                id,
                pointer_x,
                pointer_y,
                canvas_x,
                canvas_y,
            } => self.handle_drop(
                id,
                Position::new(pointer_x, pointer_y),
                Position::new(canvas_x, canvas_y),
            )?,

            Commands::List { tag, json } => self.handle_list(tag, json)?,

            Commands::Stats { json } => self.handle_stats(json)?,

            Commands::InitConfig { output } => self.handle_init_config(output)?,
        }

        Ok(())
    }

    fn handle_login(&mut self, username: &str, password: &str) -> Result<()> {
        if let Err(e) = self.state.login(username, password) {
            if let Some(message) = self.state.session().error() {
                eprintln!("{}", console::style(message).red());
            }
            return Err(e);
        }

        println!("Logged in as {}.", console::style(username).bold());
        Ok(())
    }

    fn handle_status(&self) {
        if self.state.is_logged_in() {
            println!("Logged in.");
        } else {
            println!("Not logged in. Use `login` to start a session.");
        }
    }

    fn handle_create(
        &mut self,
        title: String,
        content: String,
        color: Option<String>,
        tags: Option<String>,
    ) -> Result<()> {
        let form = self.state.form_mut();
        form.cancel();
        form.title = title;
        form.content = content;
        if let Some(color) = color {
            form.color = color;
        }
        form.tags = tags.unwrap_or_default();

        match self.state.submit_form()? {
            SubmitOutcome::Created(note) => println!("Note created with ID: {}", note.id),
            SubmitOutcome::Updated(id) => println!("Note {} updated", id),
        }
        Ok(())
    }

    /// Loads the note into the form, overrides the given fields, submits
    fn handle_edit(
        &mut self,
        id: NoteId,
        title: Option<String>,
        content: Option<String>,
        color: Option<String>,
        tags: Option<String>,
    ) -> Result<()> {
        self.state.start_edit(id)?;

        let form = self.state.form_mut();
        if let Some(title) = title {
            form.title = title;
        }
        if let Some(content) = content {
            form.content = content;
        }
        if let Some(color) = color {
            form.color = color;
        }
        if let Some(tags) = tags {
            form.tags = tags;
        }

        self.state.submit_form()?;
        println!("Note {} updated successfully", id);
        Ok(())
    }

    fn handle_delete(&mut self, id: NoteId, force: bool) -> Result<()> {
        let note = self.state.note(id)?.clone();

        if !force {
            println!("You are about to delete the following note:");
            println!("ID:      {}", note.id);
            println!("Title:   {}", note.title);
            println!("Tags:    {}", note.tags.join(", "));
            println!("Created: {}", note.created_at);

            print!("\nAre you sure you want to delete this note? [y/N]: ");
            stdout().flush().map_err(NoteboardError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(NoteboardError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.state.delete_note(id)?;
        println!("Note '{}' ({}) has been deleted.", note.title, note.id);
        Ok(())
    }

    fn handle_comment(&mut self, id: NoteId, text: String) -> Result<()> {
        self.state.note(id)?;
        self.state.form_mut().comment = text;

        if self.state.add_comment(id)? {
            println!("Comment added to note {}.", id);
        } else {
            println!("Empty comment ignored.");
        }
        Ok(())
    }

    fn handle_drop(&mut self, id: NoteId, pointer: Position, canvas: Position) -> Result<()> {
        self.state.note(id)?;
        self.state.drag_start(id)?;

        if let Some(position) = self.state.drop(pointer, canvas)? {
            println!("Note {} dropped at ({}, {}).", id, position.x, position.y);
            self.warn_if_off_canvas(id, position);
        }
        Ok(())
    }

    /// Positions are kept as given; this only tells the user the note
    /// will sit outside the configured canvas.
    fn warn_if_off_canvas(&self, id: NoteId, position: Position) {
        let canvas = self.config.canvas;
        if !canvas.contains(position) {
            debug!("Note {} placed outside the visible canvas", id);
            eprintln!(
                "{}",
                console::style(format!(
                    "Note {} is outside the {}x{} canvas and may not be visible.",
                    id, canvas.width, canvas.height
                ))
                .yellow()
            );
        }
    }

    fn handle_list(&self, tag: Option<String>, json: bool) -> Result<()> {
        let notes = self.state.notes_tagged(tag.as_deref())?;

        if json {
            println!("{}", serde_json::to_string_pretty(&notes)?);
            return Ok(());
        }

        if notes.is_empty() {
            println!("No notes found.");
            return Ok(());
        }

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, note) in notes.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }
            self.display_note(note);
        }

        println!(
            "\n{} note{}",
            notes.len(),
            if notes.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }

    fn display_note(&self, note: &Note) {
        println!(
            "ID: {} | Created: {} | Color: {}",
            note.id, note.created_at, note.color
        );
        println!("Title: {}", console::style(&note.title).bold());

        let tags: Vec<String> = note
            .tags
            .iter()
            .filter(|tag| !tag.is_empty())
            .map(|tag| format!("#{}", tag))
            .collect();
        if !tags.is_empty() {
            println!("Tags: {}", console::style(tags.join(" ")).cyan());
        }

        println!("\n{}", note.content);

        if !note.comments.is_empty() {
            println!("\nComments:");
            for comment in &note.comments {
                println!("  - {}", comment);
            }
        }

        if self.verbose {
            println!("Position: ({}, {})", note.position.x, note.position.y);
        }
    }

    fn handle_stats(&self, json: bool) -> Result<()> {
        let days = self.state.notes_per_day()?;

        if json {
            println!("{}", serde_json::to_string_pretty(&days)?);
            return Ok(());
        }

        if days.is_empty() {
            println!("No notes yet.");
            return Ok(());
        }

        for DayCount { date, count } in &days {
            println!("{}  {}", date, count);
        }
        Ok(())
    }

    fn handle_init_config(&self, output: Option<PathBuf>) -> Result<()> {
        let path = output
            .or_else(Config::default_path)
            .ok_or_else(|| NoteboardError::ConfigError {
                message: "No configuration directory available; pass --output".to_string(),
            })?;

        self.config.save(&path)?;
        info!("Wrote configuration to {}", path.display());
        println!("Configuration written to {}", path.display());
        Ok(())
    }
}
