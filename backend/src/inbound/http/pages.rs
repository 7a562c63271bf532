//! HTML views.
//!
//! Every page is built from plain strings; all user-supplied text passes
//! through [`escape_html`] before it is embedded.

use actix_web::http::StatusCode;

use crate::domain::{FeedEntry, Post, UserIdentity, USERNAME_MAX};

use super::notice::{Notice, NoticeKind};

/// Escape text for use in HTML element content and quoted attributes.
///
/// # Examples
/// ```
/// use shayari::inbound::http::pages::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
/// ```
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn nav(user: Option<&UserIdentity>) -> String {
    match user {
        Some(user) => format!(
            concat!(
                r#"<nav><a href="/">Feed</a> <a href="/post">Write</a> "#,
                r#"<a href="/dashboard">Dashboard</a> "#,
                r#"<span class="whoami">{}</span> <a href="/logout">Sign out</a></nav>"#
            ),
            escape_html(user.username.as_ref())
        ),
        None => String::from(
            r#"<nav><a href="/">Feed</a> <a href="/signin">Sign in</a> <a href="/signup">Sign up</a></nav>"#,
        ),
    }
}

fn notice_banner(notice: Option<&Notice>) -> String {
    notice.map_or_else(String::new, |notice| {
        let class = match notice.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        };
        format!(
            r#"<div class="{class}" role="status">{}</div>"#,
            escape_html(&notice.message)
        )
    })
}

fn layout(
    title: &str,
    user: Option<&UserIdentity>,
    notice: Option<&Notice>,
    body: &str,
) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title} | Shayari</title>",
            r#"<link rel="stylesheet" href="/static/site.css"></head>"#,
            "<body>{nav}<main>{notice}{body}</main>",
            r#"<script src="/static/site.js" defer></script></body></html>"#
        ),
        title = escape_html(title),
        nav = nav(user),
        notice = notice_banner(notice),
        body = body,
    )
}

fn timestamp(post: &Post) -> String {
    let created = post.created_at.format("%Y-%m-%d %H:%M UTC");
    if post.updated_at > post.created_at {
        format!(
            "{created} (edited {})",
            post.updated_at.format("%Y-%m-%d %H:%M UTC")
        )
    } else {
        created.to_string()
    }
}

fn post_card(post: &Post, byline: &str, owner_controls: bool) -> String {
    let id = post.id.to_string();
    let controls = if owner_controls {
        format!(
            concat!(
                r#"<a class="edit" href="/edit/{id}">Edit</a>"#,
                r#"<form method="post" action="/delete/{id}" class="delete">"#,
                r#"<button type="submit">Delete</button></form>"#
            ),
            id = id
        )
    } else {
        String::new()
    };
    format!(
        concat!(
            r#"<article class="shayari">"#,
            r#"<pre class="shayari-text" id="shayari-text-{id}">{content}</pre>"#,
            r#"<footer>{byline}<time>{time}</time>"#,
            r#"<button type="button" class="copy-btn" data-id="{id}">Copy</button>"#,
            "{controls}</footer></article>"
        ),
        id = id,
        content = escape_html(post.content.as_ref()),
        byline = byline,
        time = timestamp(post),
        controls = controls,
    )
}

/// Public feed, newest first.
pub fn feed(user: Option<&UserIdentity>, notice: Option<&Notice>, entries: &[FeedEntry]) -> String {
    let body = if entries.is_empty() {
        String::from(r#"<h1>Latest Shayari</h1><p class="empty">No Shayari yet.</p>"#)
    } else {
        let cards: String = entries
            .iter()
            .map(|entry| {
                let byline = format!(
                    r#"<span class="author">{}</span> "#,
                    escape_html(entry.author_username.as_ref())
                );
                post_card(&entry.post, &byline, false)
            })
            .collect();
        format!("<h1>Latest Shayari</h1>{cards}")
    };
    layout("Feed", user, notice, &body)
}

fn credentials_form(heading: &str, action: &str, button: &str, alternative: &str) -> String {
    format!(
        concat!(
            "<h1>{heading}</h1>",
            r#"<form method="post" action="{action}" class="credentials">"#,
            r#"<label>Username <input name="username" maxlength="{max}" required autofocus></label>"#,
            r#"<label>Password <input name="password" type="password" required></label>"#,
            r#"<button type="submit">{button}</button></form>"#,
            "<p>{alternative}</p>"
        ),
        heading = heading,
        action = action,
        max = USERNAME_MAX,
        button = button,
        alternative = alternative,
    )
}

/// Account creation form.
pub fn signup(notice: Option<&Notice>) -> String {
    let body = credentials_form(
        "Create an account",
        "/signup",
        "Sign up",
        r#"Already registered? <a href="/signin">Sign in</a>"#,
    );
    layout("Sign up", None, notice, &body)
}

/// Signin form.
pub fn signin(notice: Option<&Notice>) -> String {
    let body = credentials_form(
        "Sign in",
        "/signin",
        "Sign in",
        r#"New here? <a href="/signup">Create an account</a>"#,
    );
    layout("Sign in", None, notice, &body)
}

/// New post form.
pub fn new_post(user: &UserIdentity, notice: Option<&Notice>) -> String {
    let body = concat!(
        "<h1>Write a Shayari</h1>",
        r#"<form method="post" action="/post" class="compose">"#,
        r#"<textarea name="content" rows="8" required></textarea>"#,
        r#"<button type="submit">Post</button></form>"#
    );
    layout("Write", Some(user), notice, body)
}

/// The signed-in user's own posts.
pub fn dashboard(user: &UserIdentity, notice: Option<&Notice>, posts: &[Post]) -> String {
    let heading = format!(
        "<h1>{}'s Shayari</h1>",
        escape_html(user.username.as_ref())
    );
    let body = if posts.is_empty() {
        format!(
            r#"{heading}<p class="empty">You have not posted yet. <a href="/post">Write one</a>.</p>"#
        )
    } else {
        let cards: String = posts
            .iter()
            .map(|post| post_card(post, "", true))
            .collect();
        format!("{heading}{cards}")
    };
    layout("Dashboard", Some(user), notice, &body)
}

/// Edit form pre-filled with the current content.
pub fn edit_post(user: &UserIdentity, notice: Option<&Notice>, post: &Post) -> String {
    let body = format!(
        concat!(
            "<h1>Edit Shayari</h1>",
            r#"<form method="post" action="/edit/{id}" class="compose">"#,
            r#"<textarea name="content" rows="8" required>{content}</textarea>"#,
            r#"<button type="submit">Save</button> <a href="/dashboard">Cancel</a></form>"#
        ),
        id = post.id,
        content = escape_html(post.content.as_ref()),
    );
    layout("Edit", Some(user), notice, &body)
}

/// Minimal page for errors that escape a handler.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h1>{}</h1><p>{}</p><p><a href="/">Back to the feed</a></p>"#,
        escape_html(title),
        escape_html(message)
    );
    layout(title, None, None, &body)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{PostContent, UserId, Username};
    use chrono::{Duration, Utc};

    fn alice() -> UserIdentity {
        UserIdentity {
            id: UserId::random(),
            username: Username::new("alice").expect("username"),
        }
    }

    fn post(content: &str) -> Post {
        Post::draft(
            UserId::random(),
            PostContent::new(content).expect("content"),
            Utc::now(),
        )
    }

    #[test]
    fn feed_escapes_content_and_usernames() {
        let entries = vec![FeedEntry {
            post: post("<script>alert(1)</script>"),
            author_username: Username::new("<b>mallory</b>").expect("username"),
        }];
        let html = feed(None, None, &entries);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;b&gt;mallory&lt;/b&gt;"));
    }

    #[test]
    fn feed_has_no_owner_controls() {
        let entries = vec![FeedEntry {
            post: post("hello"),
            author_username: Username::new("alice").expect("username"),
        }];
        let html = feed(Some(&alice()), None, &entries);
        assert!(!html.contains("/delete/"));
        assert!(html.contains("copy-btn"));
    }

    #[test]
    fn dashboard_offers_edit_and_delete() {
        let listed = post("hello");
        let html = dashboard(&alice(), None, std::slice::from_ref(&listed));
        assert!(html.contains(&format!("/edit/{}", listed.id)));
        assert!(html.contains(&format!(r#"action="/delete/{}""#, listed.id)));
    }

    #[test]
    fn notices_render_with_their_kind() {
        let html = signin(Some(&Notice::success("Account created successfully. Please sign in.")));
        assert!(html.contains("notice-success"));
        assert!(html.contains("Account created successfully. Please sign in."));
    }

    #[test]
    fn navigation_depends_on_identity() {
        assert!(feed(None, None, &[]).contains(r#"href="/signin""#));
        let html = feed(Some(&alice()), None, &[]);
        assert!(html.contains(r#"href="/logout""#));
        assert!(html.contains("alice"));
    }

    #[test]
    fn edited_posts_show_both_times() {
        let mut edited = post("hello");
        edited.updated_at = edited.created_at + Duration::minutes(3);
        assert!(timestamp(&edited).contains("edited"));
        assert!(!timestamp(&post("fresh")).contains("edited"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let existing = post("dil & jaan");
        let html = edit_post(&alice(), None, &existing);
        assert!(html.contains("dil &amp; jaan</textarea>"));
    }
}
