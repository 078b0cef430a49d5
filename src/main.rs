use anyhow::{Context, Result, bail};
use devlog::components::layout::PageContext;
use devlog::components::post_card::post_path;
use devlog::pages::write::{WritePageData, generate as write_page_markup};
use devlog::session::{self, AuthOutcome};
use devlog::util::{format_clock, format_date, format_timestamp, unix_now};
use devlog::{
    Command, Config, DraftForm, EditorState, JsonStore, QuerySpec, SiteConfig, build_site,
    fetch_post_detail, fetch_posts_checked, write_css_assets, write_page,
};
use std::fs;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let config = Config::parse();
    devlog::logger::set_verbose(config.verbose);
    config.validate().context("Invalid configuration")?;

    let site = config.site().context("Failed to load site config")?;
    let store = JsonStore::open(&config.store)
        .with_context(|| format!("Failed to open store: {}", config.store.display()))?;

    match &config.command {
        Command::Build {
            output,
            no_open,
            theme,
        } => {
            build_site(&store, &site, output, theme).context("Failed to build site")?;
            if !no_open {
                let index = output.join("index.html");
                if let Err(e) = open::that(&index) {
                    devlog::log!("warn"; "could not open {}: {}", index.display(), e);
                }
            }
        }
        Command::Preview { file, output } => preview(file, output.as_deref(), &site)?,
        Command::List {
            category,
            search,
            page,
        } => {
            let spec = QuerySpec::new(category, search, *page, site.posts_per_page);
            let result = fetch_posts_checked(&store, &spec).context("Failed to list posts")?;
            for post in &result.items {
                println!(
                    "{:>4}  {}  [{}]  {}",
                    post.id,
                    format_date(post.created_at),
                    post.category,
                    post.title
                );
            }
            println!(
                "page {} of {} ({} posts)",
                spec.page(),
                result.page_count(spec.page_size()).max(1),
                result.total_count
            );
        }
        Command::Show { id } => {
            let detail = fetch_post_detail(&store, id);
            let Some(post) = detail.post else {
                bail!("Post not found: {}", id);
            };
            println!("{}", post.title);
            println!(
                "{} | {} | {} min read | {}",
                post.author_name,
                format_date(post.created_at),
                post.read_time_minutes,
                post.category
            );
            if !post.description.is_empty() {
                println!("\n{}", post.description);
            }
            if let Some(content) = &post.content {
                println!("\n{}", content);
            }
            println!("\n{} comments", detail.comments.len());
            for comment in &detail.comments {
                println!(
                    "- {} ({}): {}",
                    comment.author_name,
                    format_timestamp(comment.created_at),
                    comment.content
                );
            }
        }
        Command::Publish {
            content,
            title,
            description,
            category,
            tags,
            read_time,
        } => {
            let body = fs::read_to_string(content)
                .with_context(|| format!("Failed to read {}", content.display()))?;
            let mut editor = EditorState::new(DraftForm {
                title: title.clone(),
                description: description.clone(),
                content: body,
                category: category.clone(),
                tags: tags.clone(),
                read_time_minutes: *read_time,
            });
            let now = Instant::now();
            match editor.publish(&store, now) {
                Some(post) => {
                    println!("{}", post_path(&post.id));
                }
                None => {
                    let reason = editor
                        .status(now)
                        .map(|s| s.text.clone())
                        .unwrap_or_else(|| "Publishing failed".to_string());
                    bail!(reason);
                }
            }
        }
        Command::Login { email, password } => {
            report(session::login(&store, email, password))?;
        }
        Command::Signup { email, password } => {
            report(session::signup(&store, email, password))?;
        }
        Command::Logout => {
            report(session::logout(&store))?;
        }
    }

    Ok(())
}

/// Renders a markdown file through the editor.
///
/// Prints the preview markup, or writes the full editor page with its
/// stylesheet into `output`.
fn preview(file: &Path, output: Option<&Path>, site: &SiteConfig) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let title = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let mut editor = EditorState::new(DraftForm {
        title,
        content,
        ..DraftForm::default()
    });
    editor.save_draft(format_clock(unix_now()));

    let Some(output) = output else {
        println!("{}", editor.preview());
        return Ok(());
    };

    let assets_dir = output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    write_css_assets(&assets_dir, devlog::assets::DEFAULT_THEME)
        .context("Failed to write CSS assets")?;
    let path = write_page(
        output,
        "write.html",
        write_page_markup(WritePageData {
            ctx: PageContext::new(&site.title, None),
            editor: &editor,
            categories: &site.categories,
            now: Instant::now(),
        }),
    )?;
    devlog::log!("build"; "preview written to {}", path.display());
    Ok(())
}

/// Prints where an auth action lands and fails the command when it did not
/// produce a user.
fn report(outcome: AuthOutcome) -> Result<()> {
    if let Some(message) = &outcome.message {
        println!("{}", message);
    }
    println!("-> {}", outcome.redirect.path());

    if outcome.user.is_none() && outcome.message.is_some() {
        bail!("Authentication failed");
    }
    Ok(())
}
