use std::ops::Range;

use lazy_static::lazy_static;
use markdown::mdast::Node;
use markdown::{Options, ParseOptions};
use regex::{Captures, Regex};

use crate::error::{BlogError, BlogResult};

/// Turns a fetched markdown body into HTML.
///
/// Relative image links are resolved against `img_prefix`, which is where the
/// body itself was fetched from.
pub fn render_markdown(md_text: &str, img_prefix: Option<&str>) -> BlogResult<String> {
    let buf = remove_comments(md_text)?;
    let html = match markdown::to_html_with_options(buf.as_str(), &Options::gfm()) {
        Ok(x) => x,
        Err(e) => return Err(BlogError::Markdown(e.reason)),
    };
    match img_prefix {
        Some(img_prefix) => Ok(change_images(img_prefix, &html)),
        None => Ok(html),
    }
}

/// Drops HTML comments from a markdown body. Only real HTML nodes are touched,
/// code spans and fences keep their text, and an unclosed `<!--` stays as is.
pub fn remove_comments(md_post: &str) -> BlogResult<String> {
    let root = match markdown::to_mdast(md_post, &ParseOptions::gfm()) {
        Ok(x) => x,
        Err(e) => return Err(BlogError::Markdown(e.reason)),
    };

    let mut comments = vec![];
    collect_comments(&root, md_post, &mut comments);

    let mut res = String::with_capacity(md_post.len());
    let mut last = 0;
    for comment in comments {
        res.push_str(&md_post[last..comment.start]);
        last = comment.end;
    }
    res.push_str(&md_post[last..]);

    Ok(res)
}

fn collect_comments(node: &Node, md_post: &str, out: &mut Vec<Range<usize>>) {
    if let Node::Html(html) = node {
        if let Some(ref pos) = html.position {
            comments_in(md_post, pos.start.offset..pos.end.offset, out);
        }
        return;
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_comments(child, md_post, out);
        }
    }
}

fn comments_in(md_post: &str, span: Range<usize>, out: &mut Vec<Range<usize>>) {
    const START: &str = "<!--";
    const END: &str = "-->";

    let Some(block) = md_post.get(span.clone()) else {
        return;
    };

    let mut pos = 0;
    while let Some(start) = block[pos..].find(START) {
        let start = pos + start;
        let Some(end) = block[start + START.len()..].find(END) else {
            break;
        };
        let end = start + START.len() + end + END.len();
        out.push(span.start + start..span.start + end);
        pos = end;
    }
}

fn is_absolute(url: &str) -> bool {
    url.contains("://") || url.starts_with('/') || url.starts_with("data:")
}

/// Prefixes relative `src` attributes of rendered images. Raw HTML is escaped
/// by the renderer, so every `<img` left in the output comes from markdown.
fn change_images(prefix: &str, html: &str) -> String {
    lazy_static! {
        static ref IMG_SRC: Regex = Regex::new(r#"<img src="([^"]*)""#).unwrap();
    }

    IMG_SRC.replace_all(html, |caps: &Captures| {
        let url = &caps[1];
        if is_absolute(url) {
            caps[0].to_string()
        } else if prefix.ends_with('/') {
            format!(r#"<img src="{}{}""#, prefix, url)
        } else {
            format!(r#"<img src="{}/{}""#, prefix, url)
        }
    }).into_owned()
}
