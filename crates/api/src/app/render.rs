//! Server-rendered HTML pages.
//!
//! Plain string rendering behind small page functions; every piece of
//! user-supplied content goes through [`escape`].

use quill_auth::Principal;
use quill_core::PostId;
use quill_posts::Post;

/// Escape text for interpolation into HTML element content or a quoted
/// attribute value.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn nav(viewer: Option<&Principal>) -> String {
    let items = match viewer {
        Some(user) => format!(
            "<li><span>{}</span></li>\n\
             <li><form action=\"/auth/logout\" method=\"post\"><input type=\"submit\" value=\"Log Out\"></form></li>",
            escape(&user.username)
        ),
        None => "<li><a href=\"/auth/register\">Register</a></li>\n\
                 <li><a href=\"/auth/login\">Log In</a></li>"
            .to_string(),
    };
    format!("<nav>\n<h1><a href=\"/\">Quill</a></h1>\n<ul>\n{items}\n</ul>\n</nav>")
}

fn layout(title: &str, viewer: Option<&Principal>, content: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} - Quill</title>\n</head>\n<body>\n{}\n<section class=\"content\">\n{}\n</section>\n</body>\n</html>\n",
        escape(title),
        nav(viewer),
        content
    )
}

fn flash(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("<div class=\"flash\">{}</div>\n", escape(message)),
        None => String::new(),
    }
}

fn article(post: &Post, viewer: Option<&Principal>, standalone: bool) -> String {
    let title = if standalone {
        format!("<h1>{}</h1>", escape(&post.title))
    } else {
        format!(
            "<h1><a href=\"/post/{}\">{}</a></h1>",
            post.id,
            escape(&post.title)
        )
    };
    let edit = match viewer {
        Some(user) if post.is_owned_by(user.user_id) => format!(
            "\n<a class=\"action\" href=\"/post/update/{}\">Edit</a>",
            post.id
        ),
        _ => String::new(),
    };
    format!(
        "<article class=\"post\">\n<header>\n{}\n<div class=\"about\">by {} on {}</div>\n</header>\n\
         <p class=\"body\">{}</p>{}\n</article>",
        title,
        escape(&post.author),
        post.created.format("%Y-%m-%d"),
        escape(&post.body),
        edit
    )
}

pub fn index_page(posts: &[Post], viewer: Option<&Principal>) -> String {
    let articles = posts
        .iter()
        .map(|post| article(post, viewer, false))
        .collect::<Vec<_>>()
        .join("\n<hr>\n");
    layout("Posts", viewer, &format!("<header><h1>Posts</h1></header>\n{articles}"))
}

pub fn detail_page(post: &Post, viewer: Option<&Principal>) -> String {
    layout(&post.title, viewer, &article(post, viewer, true))
}

pub fn register_page(viewer: Option<&Principal>, error: Option<&str>) -> String {
    let content = format!(
        "<header><h1>Register</h1></header>\n{}\
         <form method=\"post\">\n\
         <label for=\"username\">Username</label>\n\
         <input name=\"username\" id=\"username\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" name=\"password\" id=\"password\" required>\n\
         <input type=\"submit\" value=\"Register\">\n\
         </form>",
        flash(error)
    );
    layout("Register", viewer, &content)
}

pub fn login_page(viewer: Option<&Principal>, error: Option<&str>) -> String {
    let content = format!(
        "<header><h1>Log In</h1></header>\n{}\
         <form method=\"post\">\n\
         <label for=\"username\">Username</label>\n\
         <input name=\"username\" id=\"username\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" name=\"password\" id=\"password\" required>\n\
         <input type=\"submit\" value=\"Log In\">\n\
         </form>",
        flash(error)
    );
    layout("Log In", viewer, &content)
}

/// Shared title/body form. On validation failure the submitted values are
/// rendered back so the author does not lose their draft.
fn post_form(title: &str, body: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\">\n\
         <label for=\"title\">Title</label>\n\
         <input name=\"title\" id=\"title\" value=\"{}\">\n\
         <label for=\"body\">Body</label>\n\
         <textarea name=\"body\" id=\"body\">{}</textarea>\n\
         <input type=\"submit\" value=\"{submit}\">\n\
         </form>",
        escape(title),
        escape(body)
    )
}

pub fn create_page(viewer: &Principal, error: Option<&str>, title: &str, body: &str) -> String {
    let content = format!(
        "<header><h1>New Post</h1></header>\n{}{}",
        flash(error),
        post_form(title, body, "Save")
    );
    layout("New Post", Some(viewer), &content)
}

pub fn edit_page(
    viewer: &Principal,
    post_id: PostId,
    error: Option<&str>,
    title: &str,
    body: &str,
) -> String {
    let content = format!(
        "<header><h1>Edit \"{}\"</h1></header>\n{}{}\n\
         <hr>\n\
         <form action=\"/post/delete/{}\" method=\"post\">\n\
         <input class=\"danger\" type=\"submit\" value=\"Delete\">\n\
         </form>",
        escape(title),
        flash(error),
        post_form(title, body, "Save"),
        post_id
    );
    layout("Edit", Some(viewer), &content)
}

pub fn error_page(message: &str) -> String {
    layout(message, None, &format!("<header><h1>{}</h1></header>", escape(message)))
}
