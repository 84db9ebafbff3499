use std::fs;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::fmt::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use toml::value::{Date, Datetime};

use inkpost::content::content_store::ContentStore;
use inkpost::text_utils::slugify;
use inkpost::util::os_helper::default_author;

use crate::{PostArgs, PostOutput};

#[derive(Serialize)]
struct IndexEntry<'a> {
    slug: &'a str,
    title: &'a str,
    excerpt: &'a str,
    published_date: Datetime,
    tags: &'a [String],
    read_time: u32,
    author: &'a str,
}

#[derive(Serialize)]
struct IndexFragment<'a> {
    posts: Vec<IndexEntry<'a>>,
}

fn toml_date(date: &NaiveDate) -> Datetime {
    Datetime {
        date: Some(Date {
            year: date.year() as u16,
            month: date.month() as u8,
            day: date.day() as u8,
        }),
        time: None,
        offset: None,
    }
}

fn render_entry(args: &PostArgs, slug: &str, author: &str, date: &NaiveDate) -> Result<String> {
    let fragment = IndexFragment {
        posts: vec![IndexEntry {
            slug,
            title: &args.title,
            excerpt: &args.excerpt,
            published_date: toml_date(date),
            tags: &args.tags,
            read_time: args.read_time,
            author,
        }],
    };
    toml::to_string(&fragment).context("Error serializing index entry")
}

fn render_body(title: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "# {}", title);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

/// The index as it would be after appending `entry`, rejected when the server
/// could no longer load it.
fn extended_index(existing: &str, entry: &str) -> Result<String> {
    let buf = format!("{}\n{}", existing, entry);
    if let Err(e) = ContentStore::from_toml_str(&buf) {
        bail!("New entry would make the content index invalid: {}", e);
    }
    Ok(buf)
}

fn read_index(index: &Path) -> Result<String> {
    if !index.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(index).with_context(|| format!("Error reading index {}", index.display()))
}

fn append_entry(index: &Path, entry: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(index)
        .with_context(|| format!("Error opening index {}", index.display()))?;
    writeln!(file)?;
    file.write_all(entry.as_bytes())?;
    Ok(())
}

pub fn post_cmd(args: PostArgs) -> Result<()> {
    let slug = slugify(&args.title);
    if slug.is_empty() {
        bail!("Title [{}] does not produce a valid slug", args.title);
    }

    let author = args.name.clone().unwrap_or_else(default_author);
    let date = Local::now().date_naive();
    let entry = render_entry(&args, &slug, &author, &date)?;
    let body = render_body(&args.title);

    let existing = match (&args.output, &args.index) {
        (PostOutput::File, Some(index)) => read_index(index)?,
        _ => String::new(),
    };
    extended_index(&existing, &entry)?;

    match args.output {
        PostOutput::Stdout => {
            println!("{}", entry);
            println!("{}", body);
        }
        PostOutput::File => {
            let body_path = args.content_dir.join(format!("{}.md", slug));
            if body_path.exists() {
                bail!("{} already exists", body_path.display());
            }
            println!("Creating file {}", body_path.display());
            let mut file = File::create(&body_path)
                .with_context(|| format!("Error creating {}", body_path.display()))?;
            file.write_all(body.as_bytes())?;

            match args.index {
                Some(ref index) => {
                    println!("Adding {} to {}", slug, index.display());
                    append_entry(index, &entry)?;
                }
                None => println!("{}", entry),
            }
        }
    };

    Ok(())
}
