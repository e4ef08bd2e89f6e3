//! Application state and logic

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use newsroom_core::models::DATE_FORMAT;
use newsroom_core::query::all_tags;
use newsroom_core::subscribe::subscribe_link;
use newsroom_core::{
    Article, ArticleDraft, ArticleQuery, KeyValueStore, NewsletterDraft, NewsletterIssue,
    Newsroom,
};

/// Issues shown on the home screen
pub const HOME_NEWSLETTERS: usize = crate::commands::home::HOME_NEWSLETTERS;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Articles,
    Newsletters,
    Editor,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Articles, View::Newsletters, View::Editor];

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Articles => "Articles",
            View::Newsletters => "Newsletters",
            View::Editor => "Editor",
        }
    }
}

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing a search query (after pressing /)
    Search,
    /// Editing a single-line form field
    Field,
    /// Typing the path of a file to import
    ImportPath,
    /// Waiting for y/n on an article delete
    ConfirmDelete,
}

/// Which form the editor shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Article,
    Newsletter,
}

impl FormKind {
    pub fn toggle(self) -> Self {
        match self {
            FormKind::Article => FormKind::Newsletter,
            FormKind::Newsletter => FormKind::Article,
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            FormKind::Article => &[
                Field::Title,
                Field::Author,
                Field::Date,
                Field::Category,
                Field::Tags,
                Field::Summary,
                Field::Cover,
                Field::Content,
            ],
            FormKind::Newsletter => &[
                Field::Title,
                Field::Date,
                Field::Highlight,
                Field::Content,
            ],
        }
    }
}

/// A form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Date,
    Category,
    Tags,
    Summary,
    Cover,
    Highlight,
    Content,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Date => "Date",
            Field::Category => "Category",
            Field::Tags => "Tags",
            Field::Summary => "Summary",
            Field::Cover => "Cover image",
            Field::Highlight => "Highlight",
            Field::Content => "Content",
        }
    }

    /// Multi-line fields are edited in $EDITOR
    pub fn is_multiline(self) -> bool {
        self == Field::Content
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current screen
    pub view: View,
    /// Current input mode
    pub input_mode: InputMode,
    /// Input buffer for search, field and path entry
    pub input: String,
    /// Cursor position in `input`, in characters
    pub input_cursor: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Error shown in a modal until any key is pressed
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,

    /// All articles, collection order
    pub all_articles: Vec<Article>,
    /// Current search and tag filter
    pub query: ArticleQuery,
    /// Filtered, date-sorted articles
    pub results: Vec<Article>,
    /// Selected index into `results`
    pub article_index: usize,
    /// Whether the article detail modal is open
    pub detail_open: bool,
    /// Scroll offset for the detail modal
    pub detail_scroll: u16,

    /// Newsletter archive, most recent first
    pub newsletters: Vec<NewsletterIssue>,
    /// Selected index into `newsletters`
    pub newsletter_index: usize,
    /// Id of the issue whose content is expanded
    pub expanded_newsletter: Option<String>,

    /// Form shown in the editor
    pub form: FormKind,
    /// Selected field in the current form
    pub field_index: usize,
    pub article_draft: ArticleDraft,
    pub newsletter_draft: NewsletterDraft,
    /// Path the cover image was read from
    pub cover_path: String,

    /// Date new drafts are stamped with
    pub today: NaiveDate,
    /// Subscription recipient
    pub subscribe_email: String,
}

impl App {
    /// Create a new app with data from the newsroom
    pub fn new<S: KeyValueStore>(newsroom: &Newsroom<S>, subscribe_email: String) -> Self {
        let today = newsroom.today();
        let mut app = Self {
            should_quit: false,
            view: View::Home,
            input_mode: InputMode::Normal,
            input: String::new(),
            input_cursor: 0,
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
            all_articles: Vec::new(),
            query: ArticleQuery::default(),
            results: Vec::new(),
            article_index: 0,
            detail_open: false,
            detail_scroll: 0,
            newsletters: Vec::new(),
            newsletter_index: 0,
            expanded_newsletter: None,
            form: FormKind::Article,
            field_index: 0,
            article_draft: ArticleDraft::new(today),
            newsletter_draft: NewsletterDraft::new(today),
            cover_path: String::new(),
            today,
            subscribe_email,
        };
        app.refresh(newsroom);
        app
    }

    /// Reload collections from the newsroom and re-apply the filter
    pub fn refresh<S: KeyValueStore>(&mut self, newsroom: &Newsroom<S>) {
        self.all_articles = newsroom.articles().to_vec();
        self.newsletters = newsroom.sorted_newsletters();
        if self.newsletter_index >= self.newsletters.len() {
            self.newsletter_index = self.newsletters.len().saturating_sub(1);
        }
        self.apply_query();
    }

    /// Re-run the query over the cached articles
    pub fn apply_query(&mut self) {
        self.results = self.query.apply(&self.all_articles);
        if self.article_index >= self.results.len() {
            self.article_index = self.results.len().saturating_sub(1);
        }
    }

    // ==================== Status ====================

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ==================== Navigation ====================

    /// Switch screens
    pub fn navigate(&mut self, view: View) {
        self.view = view;
        self.detail_open = false;
        self.input_mode = InputMode::Normal;
    }

    pub fn current_article(&self) -> Option<&Article> {
        self.results.get(self.article_index)
    }

    pub fn current_newsletter(&self) -> Option<&NewsletterIssue> {
        self.newsletters.get(self.newsletter_index)
    }

    pub fn current_field(&self) -> Field {
        let fields = self.form.fields();
        fields[self.field_index.min(fields.len() - 1)]
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        match self.view {
            View::Articles if self.detail_open => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            View::Articles => self.article_index = self.article_index.saturating_sub(1),
            View::Newsletters => self.newsletter_index = self.newsletter_index.saturating_sub(1),
            View::Editor => self.field_index = self.field_index.saturating_sub(1),
            View::Home => {}
        }
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self) {
        match self.view {
            View::Articles if self.detail_open => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            View::Articles => {
                if self.article_index + 1 < self.results.len() {
                    self.article_index += 1;
                }
            }
            View::Newsletters => {
                if self.newsletter_index + 1 < self.newsletters.len() {
                    self.newsletter_index += 1;
                }
            }
            View::Editor => {
                if self.field_index + 1 < self.form.fields().len() {
                    self.field_index += 1;
                }
            }
            View::Home => {}
        }
    }

    // ==================== Articles ====================

    /// Start typing a search query
    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
        self.input = self.query.text.clone();
        self.input_cursor = self.input.chars().count();
    }

    /// Drop the search text (tag filter stays)
    pub fn clear_search(&mut self) {
        self.query.text.clear();
        self.apply_query();
    }

    /// Cycle the tag filter: none, then each tag in first-seen order
    pub fn cycle_tag(&mut self) {
        let tags = all_tags(&self.all_articles);
        let next = match tags.iter().position(|t| *t == self.query.tag) {
            _ if self.query.tag.is_empty() => tags.first().cloned(),
            Some(i) => tags.get(i + 1).cloned(),
            None => None,
        };
        self.query.tag = next.unwrap_or_default();
        self.article_index = 0;
        self.apply_query();

        if self.query.tag.is_empty() {
            self.set_status("Tag filter: all");
        } else {
            self.set_status(format!("Tag filter: #{}", self.query.tag));
        }
    }

    pub fn open_detail(&mut self) {
        if self.current_article().is_some() {
            self.detail_open = true;
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    /// Ask for confirmation before deleting the selected article
    pub fn request_delete(&mut self) {
        if self.current_article().is_some() {
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    /// Delete the selected article
    pub fn confirm_delete<S: KeyValueStore>(&mut self, newsroom: &mut Newsroom<S>) {
        self.input_mode = InputMode::Normal;
        let Some(id) = self.current_article().map(|a| a.id.clone()) else {
            return;
        };
        match newsroom.delete_article(&id) {
            Some(removed) => self.set_status(format!("Deleted '{}'", removed.title)),
            None => self.set_status("Article no longer exists"),
        }
        self.detail_open = false;
        self.refresh(newsroom);
    }

    pub fn cancel_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        self.set_status("Delete cancelled");
    }

    // ==================== Newsletters ====================

    /// Expand or collapse the selected issue
    pub fn toggle_newsletter(&mut self) {
        let Some(id) = self.current_newsletter().map(|n| n.id.clone()) else {
            return;
        };
        if self.expanded_newsletter.as_deref() == Some(id.as_str()) {
            self.expanded_newsletter = None;
        } else {
            self.expanded_newsletter = Some(id);
        }
    }

    pub fn is_expanded(&self, issue: &NewsletterIssue) -> bool {
        self.expanded_newsletter.as_deref() == Some(issue.id.as_str())
    }

    /// The mailto link for a subscription request
    pub fn subscribe_link(&self) -> String {
        subscribe_link(&self.subscribe_email)
    }

    // ==================== Editor ====================

    /// Switch between the article and newsletter forms
    pub fn toggle_form(&mut self) {
        self.form = self.form.toggle();
        self.field_index = 0;
    }

    /// Display value of a field in the current form
    pub fn field_value(&self, field: Field) -> String {
        match (self.form, field) {
            (FormKind::Article, Field::Title) => self.article_draft.title.clone(),
            (FormKind::Article, Field::Author) => self.article_draft.author.clone(),
            (FormKind::Article, Field::Date) => {
                self.article_draft.date.format(DATE_FORMAT).to_string()
            }
            (FormKind::Article, Field::Category) => self.article_draft.category.clone(),
            (FormKind::Article, Field::Tags) => crate::output::hashtags(&self.article_draft.tags),
            (FormKind::Article, Field::Summary) => self.article_draft.summary.clone(),
            (FormKind::Article, Field::Cover) => self.cover_path.clone(),
            (FormKind::Article, Field::Content) => self.article_draft.content.clone(),
            (FormKind::Newsletter, Field::Title) => self.newsletter_draft.title.clone(),
            (FormKind::Newsletter, Field::Date) => {
                self.newsletter_draft.date.format(DATE_FORMAT).to_string()
            }
            (FormKind::Newsletter, Field::Highlight) => self.newsletter_draft.highlight.clone(),
            (FormKind::Newsletter, Field::Content) => self.newsletter_draft.content.clone(),
            _ => String::new(),
        }
    }

    /// Start editing the selected single-line field
    ///
    /// Tags start empty: each entry adds one tag.
    pub fn begin_field_edit(&mut self) {
        let field = self.current_field();
        self.input = match field {
            Field::Tags => String::new(),
            other => self.field_value(other),
        };
        self.input_cursor = self.input.chars().count();
        self.input_mode = InputMode::Field;
    }

    /// Apply the input buffer to the selected field
    pub fn commit_field(&mut self) {
        let field = self.current_field();
        let value = std::mem::take(&mut self.input);
        self.input_cursor = 0;
        self.input_mode = InputMode::Normal;

        match (self.form, field) {
            (_, Field::Date) => match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
                Ok(date) => match self.form {
                    FormKind::Article => self.article_draft.date = date,
                    FormKind::Newsletter => self.newsletter_draft.date = date,
                },
                Err(_) => self.set_status("Date must be YYYY-MM-DD"),
            },
            (FormKind::Article, Field::Tags) => {
                if !self.article_draft.add_tag(&value) && !value.trim().is_empty() {
                    self.set_status(format!("Tag '{}' is already added", value.trim()));
                }
            }
            (FormKind::Article, Field::Cover) => self.set_cover(value.trim()),
            (FormKind::Article, Field::Title) => self.article_draft.title = value,
            (FormKind::Article, Field::Author) => self.article_draft.author = value,
            (FormKind::Article, Field::Category) => self.article_draft.category = value,
            (FormKind::Article, Field::Summary) => self.article_draft.summary = value,
            (FormKind::Newsletter, Field::Title) => self.newsletter_draft.title = value,
            (FormKind::Newsletter, Field::Highlight) => self.newsletter_draft.highlight = value,
            (_, Field::Content) => self.set_content(value),
            _ => {}
        }
    }

    /// Leave field editing without applying
    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
        self.input_mode = InputMode::Normal;
    }

    /// Remove the last tag of the article draft
    pub fn remove_last_tag(&mut self) {
        if let Some(tag) = self.article_draft.tags.last().cloned() {
            self.article_draft.remove_tag(&tag);
            self.set_status(format!("Removed #{}", tag));
        }
    }

    /// Set the body of the current form
    pub fn set_content(&mut self, content: String) {
        match self.form {
            FormKind::Article => self.article_draft.content = content,
            FormKind::Newsletter => self.newsletter_draft.content = content,
        }
    }

    /// Body of the current form
    pub fn content(&self) -> &str {
        match self.form {
            FormKind::Article => &self.article_draft.content,
            FormKind::Newsletter => &self.newsletter_draft.content,
        }
    }

    fn set_cover(&mut self, path: &str) {
        if path.is_empty() {
            self.article_draft.cover.clear();
            self.cover_path.clear();
            return;
        }
        match self.article_draft.set_cover_from_file(Path::new(path)) {
            Ok(()) => {
                self.cover_path = path.to_string();
                self.set_status("Cover image attached");
            }
            Err(e) => self.set_error(format!("{:#}", e)),
        }
    }

    /// Validate and publish the current form
    pub fn submit<S: KeyValueStore>(&mut self, newsroom: &mut Newsroom<S>) {
        let result = match self.form {
            FormKind::Article => newsroom
                .publish_article(self.article_draft.clone())
                .map(|a| format!("Article published: '{}'", a.title)),
            FormKind::Newsletter => newsroom
                .add_newsletter(self.newsletter_draft.clone())
                .map(|n| format!("Newsletter added: '{}'", n.title)),
        };

        match result {
            Ok(message) => {
                self.reset_form();
                self.refresh(newsroom);
                self.set_status(message);
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Clear the current form
    pub fn reset_form(&mut self) {
        match self.form {
            FormKind::Article => {
                self.article_draft.reset(self.today);
                self.cover_path.clear();
            }
            FormKind::Newsletter => self.newsletter_draft.reset(self.today),
        }
        self.field_index = 0;
    }

    /// Write the export file into `dir`
    pub fn export<S: KeyValueStore>(&mut self, newsroom: &Newsroom<S>, dir: &Path) {
        let path = dir.join(newsroom.export_filename());
        let written = newsroom
            .export_json()
            .and_then(|json| fs::write(&path, json).map_err(anyhow::Error::from));
        match written {
            Ok(()) => self.set_status(format!("Exported to {}", path.display())),
            Err(e) => self.set_error(format!("Export failed: {:#}", e)),
        }
    }

    /// Start typing an import path
    pub fn enter_import_mode(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
        self.input_mode = InputMode::ImportPath;
    }

    /// Import from the path in the input buffer
    pub fn import<S: KeyValueStore>(&mut self, newsroom: &mut Newsroom<S>) {
        let path = PathBuf::from(std::mem::take(&mut self.input).trim());
        self.input_cursor = 0;
        self.input_mode = InputMode::Normal;

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                self.set_error(format!("Could not read {}: {}", path.display(), e));
                return;
            }
        };

        match newsroom.import(&json) {
            Ok(summary) => {
                self.refresh(newsroom);
                self.set_status(summary.to_string());
            }
            Err(e) => self.set_error(format!("Import failed: {}", e)),
        }
    }

    // ==================== Text input ====================

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let at = byte_index(&self.input, self.input_cursor);
        self.input.insert(at, c);
        self.input_cursor += 1;
        self.sync_search();
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.input_cursor > 0 {
            self.input_cursor -= 1;
            let at = byte_index(&self.input, self.input_cursor);
            self.input.remove(at);
            self.sync_search();
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.input_cursor < self.input.chars().count() {
            self.input_cursor += 1;
        }
    }

    /// Search results follow the input as it is typed
    fn sync_search(&mut self) {
        if self.input_mode == InputMode::Search {
            self.query.text = self.input.clone();
            self.article_index = 0;
            self.apply_query();
        }
    }
}

/// Byte offset of the `char_idx`-th character
fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::storage::{MemoryStore, ARTICLES_KEY, NEWSLETTERS_KEY};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    fn seeded() -> Newsroom<MemoryStore> {
        Newsroom::open(MemoryStore::new(), today())
    }

    fn empty() -> Newsroom<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert_raw(ARTICLES_KEY, "[]");
        store.insert_raw(NEWSLETTERS_KEY, "[]");
        Newsroom::open(store, today())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_starts_on_home() {
        let app = App::new(&seeded(), "editor@example.com".to_string());
        assert_eq!(app.view, View::Home);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.results.len(), 2);
    }

    #[test]
    fn test_navigation_is_unconditional() {
        let mut app = App::new(&seeded(), String::new());
        for view in View::ALL {
            app.navigate(view);
            assert_eq!(app.view, view);
        }
        app.navigate(View::Articles);
        app.open_detail();
        app.navigate(View::Articles);
        assert!(!app.detail_open);
    }

    #[test]
    fn test_live_search() {
        let mut app = App::new(&seeded(), String::new());
        app.navigate(View::Articles);
        app.enter_search_mode();
        type_text(&mut app, "dining");
        assert_eq!(app.results.len(), 1);

        app.delete_char();
        assert_eq!(app.query.text, "dinin");

        app.input_mode = InputMode::Normal;
        app.clear_search();
        assert_eq!(app.results.len(), 2);
    }

    #[test]
    fn test_cycle_tag() {
        let mut app = App::new(&seeded(), String::new());
        let tags = all_tags(&app.all_articles);

        app.cycle_tag();
        assert_eq!(app.query.tag, tags[0]);
        assert!(app.results.iter().all(|a| a.has_tag(&tags[0])));

        for _ in 1..tags.len() {
            app.cycle_tag();
        }
        assert_eq!(app.query.tag, *tags.last().unwrap());

        app.cycle_tag();
        assert!(app.query.tag.is_empty());
        assert_eq!(app.results.len(), 2);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut newsroom = seeded();
        let mut app = App::new(&newsroom, String::new());
        app.navigate(View::Articles);

        app.request_delete();
        assert_eq!(app.input_mode, InputMode::ConfirmDelete);
        app.cancel_delete();
        assert_eq!(newsroom.articles().len(), 2);

        let target = app.current_article().unwrap().id.clone();
        app.request_delete();
        app.confirm_delete(&mut newsroom);
        assert_eq!(newsroom.articles().len(), 1);
        assert!(newsroom.article(&target).is_none());
        assert_eq!(app.results.len(), 1);
    }

    #[test]
    fn test_toggle_newsletter() {
        let mut app = App::new(&seeded(), String::new());
        let issue = app.current_newsletter().unwrap().clone();
        app.toggle_newsletter();
        assert!(app.is_expanded(&issue));
        app.toggle_newsletter();
        assert!(!app.is_expanded(&issue));
    }

    #[test]
    fn test_subscribe_link_uses_configured_email() {
        let app = App::new(&seeded(), "desk@school.edu".to_string());
        assert!(app.subscribe_link().starts_with("mailto:desk@school.edu?subject="));
    }

    #[test]
    fn test_form_editing_and_submit() {
        let mut newsroom = empty();
        let mut app = App::new(&newsroom, String::new());
        app.navigate(View::Editor);

        // Title
        app.begin_field_edit();
        type_text(&mut app, "Budget vote");
        app.commit_field();

        // Submitting without an author fails and keeps the draft
        app.submit(&mut newsroom);
        assert!(newsroom.articles().is_empty());
        assert_eq!(app.article_draft.title, "Budget vote");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Please enter the author.")
        );

        // Author
        app.move_down();
        app.begin_field_edit();
        type_text(&mut app, "Council Desk");
        app.commit_field();

        // Tags: each entry adds one, duplicates are ignored
        app.field_index = 4;
        assert_eq!(app.current_field(), Field::Tags);
        for tag in ["council", "money", "council"] {
            app.begin_field_edit();
            type_text(&mut app, tag);
            app.commit_field();
        }
        assert_eq!(app.article_draft.tags, vec!["council", "money"]);
        app.remove_last_tag();
        assert_eq!(app.article_draft.tags, vec!["council"]);

        app.set_content("# Body".to_string());
        app.submit(&mut newsroom);

        assert_eq!(newsroom.articles().len(), 1);
        assert_eq!(newsroom.articles()[0].title, "Budget vote");
        assert_eq!(newsroom.articles()[0].content, "# Body");
        // Form is reset after a successful submit
        assert!(app.article_draft.title.is_empty());
        assert_eq!(app.results.len(), 1);
    }

    #[test]
    fn test_invalid_date_keeps_previous() {
        let mut app = App::new(&empty(), String::new());
        app.navigate(View::Editor);
        app.field_index = 2;
        assert_eq!(app.current_field(), Field::Date);

        app.begin_field_edit();
        assert_eq!(app.input, "2024-09-02");
        app.input = "tomorrow".to_string();
        app.commit_field();
        assert_eq!(app.article_draft.date, today());

        app.begin_field_edit();
        app.input = "2024-12-25".to_string();
        app.commit_field();
        assert_eq!(
            app.article_draft.date,
            NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()
        );
    }

    #[test]
    fn test_newsletter_form() {
        let mut newsroom = empty();
        let mut app = App::new(&newsroom, String::new());
        app.navigate(View::Editor);
        app.toggle_form();
        assert_eq!(app.form, FormKind::Newsletter);
        assert_eq!(app.current_field(), Field::Title);

        app.begin_field_edit();
        type_text(&mut app, "Weekly #2");
        app.commit_field();
        app.submit(&mut newsroom);

        assert_eq!(newsroom.newsletters().len(), 1);
        assert_eq!(app.newsletters.len(), 1);
    }

    #[test]
    fn test_export_and_import() {
        let temp_dir = TempDir::new().unwrap();
        let source = seeded();
        let mut app = App::new(&source, String::new());
        app.export(&source, temp_dir.path());
        assert!(!app.has_error());

        let mut target = empty();
        let mut app = App::new(&target, String::new());
        app.enter_import_mode();
        let path = temp_dir.path().join(source.export_filename());
        type_text(&mut app, &path.display().to_string());
        app.import(&mut target);

        assert!(!app.has_error());
        assert_eq!(target.articles(), source.articles());
        assert_eq!(app.results.len(), 2);
    }

    #[test]
    fn test_import_bad_file_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let mut newsroom = seeded();
        let mut app = App::new(&newsroom, String::new());
        app.enter_import_mode();
        type_text(&mut app, &path.display().to_string());
        app.import(&mut newsroom);

        assert!(app.has_error());
        assert_eq!(newsroom.articles().len(), 2);
    }

    #[test]
    fn test_multibyte_input() {
        let mut app = App::new(&empty(), String::new());
        app.input_mode = InputMode::Field;
        type_text(&mut app, "기사");
        app.cursor_left();
        app.insert_char('x');
        assert_eq!(app.input, "기x사");
        app.delete_char();
        assert_eq!(app.input, "기사");
    }
}
