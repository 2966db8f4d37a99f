// src/ports/html.rs
use crate::config::ThemeConfig;
use crate::domain::{Note, Session};
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter {
    theme: ThemeConfig,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: ThemeConfig) -> Self {
        Self { theme }
    }

    fn render_card(&self, note: &Note) -> String {
        let name = encode_text(&note.name);
        let image = match &note.image {
            Some(url) => format!(
                r#"
            <img class="note-image" src="{}" alt="{}">"#,
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(&note.name)
            ),
            None => String::new(),
        };

        format!(
            r#"        <div class="note" data-note-id="{id}">
            <h3>📝 {name}</h3>
            <p class="description">{description}</p>{image}
            <button class="delete" data-note-id="{id}">❌ Delete</button>
        </div>
"#,
            id = encode_double_quoted_attribute(note.id.as_str()),
            name = name,
            description = encode_text(&note.description),
            image = image,
        )
    }

    fn render_modal(&self) -> &'static str {
        r#"    <div class="backdrop"></div>
    <div class="modal">
        <h3>✨ Create a New Note</h3>
        <form method="post" enctype="multipart/form-data">
            <label>Note Title <input name="name" placeholder="Note Title" required></label>
            <label>Note Description <input name="description" placeholder="Note Description" required></label>
            <input name="image" type="file" accept="image/*">
            <div class="actions">
                <button type="submit" class="primary">➕ Create Note</button>
                <button type="button" class="cancel">❎ Cancel</button>
            </div>
        </form>
    </div>
"#
    }

    /// Render the whole board: grid of notes, "+" button, optional creation
    /// modal, and the sign-out control
    #[instrument(level = "debug", skip_all, fields(notes = notes.len(), modal_open = modal_open))]
    pub fn render_board(&self, notes: &[Note], modal_open: bool, session: &Session) -> String {
        let cards: String = notes.iter().map(|n| self.render_card(n)).collect();
        let modal = if modal_open { self.render_modal() } else { "" };
        let theme = &self.theme;

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Sticky Notes</title>
    <link href="https://fonts.googleapis.com/css2?family=Patrick+Hand&display=swap" rel="stylesheet">
    <style>
        body {{
            font-family: {font};
            background-color: #FEF9C3;
            color: #1F2937;
            min-height: 100vh;
            margin: 0;
            padding: 1.5rem;
        }}
        h2 {{
            text-align: center;
            font-size: 3rem;
        }}
        .grid {{
            display: grid;
            gap: 1.5rem;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
        }}
        .note {{
            background: #FEF08A;
            padding: 1rem;
            border-radius: 8px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
            transition: transform 0.3s ease-in-out;
        }}
        .note:hover {{
            transform: rotate(1deg) scale(1.05);
        }}
        .description {{
            font-style: italic;
        }}
        .note-image {{
            width: 100%;
            border-radius: 4px;
        }}
        .delete {{
            background: #EF4444;
            color: white;
        }}
        button.primary, .add {{
            background-color: {primary};
            color: {primary_text};
        }}
        button.primary:hover, .add:hover {{
            background-color: {primary_hover};
        }}
        .add {{
            position: fixed;
            bottom: 1.5rem;
            right: 1.5rem;
            height: 4rem;
            width: 4rem;
            border-radius: 50%;
            font-size: 2rem;
        }}
        .backdrop {{
            position: fixed;
            inset: 0;
            background: rgba(0,0,0,0.4);
        }}
        .modal {{
            position: fixed;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            background: #FEFCE8;
            padding: 1.5rem;
            border-radius: 8px;
            width: 90%;
            max-width: 32rem;
        }}
        .signout {{
            display: block;
            margin: 2.5rem auto 0;
            background: #1F2937;
            color: white;
        }}
    </style>
</head>
<body data-theme="{theme_name}">
    <h2>🗒️ Sticky Notes</h2>
    <div class="grid">
{cards}    </div>
    <button class="add">➕</button>
{modal}    <button class="signout" title="Signed in as {identity}">🚪 Sign Out</button>
</body>
</html>"#,
            font = theme.font_family,
            primary = theme.primary_color,
            primary_hover = theme.primary_hover_color,
            primary_text = theme.primary_text_color,
            theme_name = encode_double_quoted_attribute(&theme.name),
            cards = cards,
            modal = modal,
            identity = encode_double_quoted_attribute(session.identity.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteId;
    use crate::util::testing::test_session;
    use rstest::rstest;

    fn note(id: &str, name: &str, description: &str, image: Option<&str>) -> Note {
        Note {
            id: NoteId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn given_note_without_image_when_rendering_then_omits_img_tag() {
        let presenter = HtmlPresenter::new();
        let notes = vec![note("n1", "Groceries", "milk, eggs", None)];

        let html = presenter.render_board(&notes, false, &test_session("user-1"));

        assert!(html.contains("📝 Groceries"));
        assert!(html.contains("milk, eggs"));
        assert!(!html.contains("<img"));
        assert!(html.contains(r#"data-note-id="n1""#));
    }

    #[test]
    fn given_note_with_url_when_rendering_then_includes_image() {
        let presenter = HtmlPresenter::new();
        let notes = vec![note(
            "n2",
            "Trip",
            "packing list",
            Some("file:///tmp/media/u/beach.jpg?expires=1&signature=ab"),
        )];

        let html = presenter.render_board(&notes, false, &test_session("user-1"));

        assert!(html.contains(
            r#"src="file:///tmp/media/u/beach.jpg?expires=1&amp;signature=ab""#
        ));
        assert!(html.contains(r#"alt="Trip""#));
    }

    #[rstest]
    #[case(true, true)]
    #[case(false, false)]
    fn given_modal_flag_when_rendering_then_form_follows_flag(
        #[case] modal_open: bool,
        #[case] expect_form: bool,
    ) {
        let presenter = HtmlPresenter::new();

        let html = presenter.render_board(&[], modal_open, &test_session("user-1"));

        assert_eq!(html.contains("<form"), expect_form);
        assert_eq!(html.contains(r#"name="name""#), expect_form);
        assert!(html.contains("Sign Out"));
    }

    #[test]
    fn given_markup_in_note_when_rendering_then_escapes_it() {
        let presenter = HtmlPresenter::new();
        let notes = vec![note("n1", "<script>alert(1)</script>", "a & b", None)];

        let html = presenter.render_board(&notes, false, &test_session("user-1"));

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn given_custom_theme_when_rendering_then_uses_its_tokens() {
        let presenter = HtmlPresenter::with_theme(ThemeConfig {
            primary_color: "#FF80AB".to_string(),
            ..Default::default()
        });

        let html = presenter.render_board(&[], false, &test_session("user-1"));

        assert!(html.contains("background-color: #FF80AB;"));
        assert!(html.contains("'Patrick Hand', cursive"));
    }
}
