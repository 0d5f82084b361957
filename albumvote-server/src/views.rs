//! HTML views
//!
//! Handlers pass plain data in and get a complete page back. All catalog
//! text is escaped here; nothing else in the service builds markup.

use albumvote_common::{PageData, RankedEntry};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="stylesheet" href="/static/style.css">"#;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str, script: Option<&str>) -> String {
    let script_tag = script
        .map(|src| format!(r#"<script src="{}" defer></script>"#, src))
        .unwrap_or_default();

    format!(
        r#"{head}
    <title>{title}</title>
    {script_tag}
</head>
<body>
    <header>
        <h1>{title}</h1>
        <nav><a href="/">Home</a> · <a href="/top">Top Albums</a></nav>
    </header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        head = PAGE_HEAD,
        title = escape_html(title),
        script_tag = script_tag,
        body = body,
    )
}

/// GET / landing page
pub fn render_landing() -> String {
    page(
        "Album Vote",
        r#"        <p>Sign in with your music account to list your saved albums and let friends vote on them.</p>
        <a class="button" href="/login">Log in</a>"#,
        None,
    )
}

/// Saved albums with vote buttons
pub fn render_albums(data: &PageData) -> String {
    let body = if data.albums.is_empty() {
        r#"        <p class="empty">No saved albums found.</p>"#.to_string()
    } else {
        let cards: String = data
            .albums
            .iter()
            .map(|album| {
                let image = if album.image_url.is_empty() {
                    r#"<div class="cover placeholder"></div>"#.to_string()
                } else {
                    format!(
                        r#"<img class="cover" src="{}" alt="{}">"#,
                        escape_html(&album.image_url),
                        escape_html(&album.name)
                    )
                };
                format!(
                    r#"        <li class="album" data-album-id="{id}">
            {image}
            <div class="title">{name}</div>
            <div class="artist">{artist}</div>
            <button class="vote" data-album-id="{id}">Vote</button>
            <span class="votes" id="votes-{id}">{votes}</span>
        </li>
"#,
                    id = escape_html(&album.id),
                    image = image,
                    name = escape_html(&album.name),
                    artist = escape_html(&album.artist),
                    votes = album.votes,
                )
            })
            .collect();
        format!("        <ul class=\"albums\">\n{}        </ul>", cards)
    };

    page("Your Albums", &body, Some("/static/vote.js"))
}

/// Top albums ranking with reset control
pub fn render_top(entries: &[RankedEntry]) -> String {
    let list = if entries.is_empty() {
        r#"        <p class="empty">No votes yet.</p>"#.to_string()
    } else {
        let rows: String = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "            <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    i + 1,
                    escape_html(&entry.id),
                    entry.votes
                )
            })
            .collect();
        format!(
            r#"        <table class="ranking">
            <thead><tr><th>#</th><th>Album</th><th>Votes</th></tr></thead>
            <tbody>
{}            </tbody>
        </table>"#,
            rows
        )
    };

    let body = format!(
        r#"{}
        <form method="post" action="/reset">
            <button type="submit">Reset votes</button>
        </form>"#,
        list
    );

    page("Top Albums", &body, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use albumvote_common::AlbumWithVotes;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_albums_page_escapes_catalog_text() {
        let data = PageData {
            albums: vec![AlbumWithVotes {
                id: "abc".to_string(),
                name: "<script>alert(1)</script>".to_string(),
                artist: "Simon & Garfunkel".to_string(),
                image_url: String::new(),
                votes: 4,
            }],
        };

        let html = render_albums(&data);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Simon &amp; Garfunkel"));
        assert!(html.contains(r#"id="votes-abc">4<"#));
        assert!(html.contains("placeholder"));
        assert!(html.contains("/static/vote.js"));
    }

    #[test]
    fn test_top_page_lists_entries_in_order() {
        let html = render_top(&[RankedEntry::new("x", 3), RankedEntry::new("y", 1)]);
        let x = html.find("<td>x</td>").unwrap();
        let y = html.find("<td>y</td>").unwrap();
        assert!(x < y);
        assert!(html.contains(r#"action="/reset""#));
    }

    #[test]
    fn test_empty_views() {
        assert!(render_top(&[]).contains("No votes yet."));
        assert!(render_albums(&PageData::default()).contains("No saved albums found."));
        assert!(render_landing().contains(r#"href="/login""#));
    }
}
