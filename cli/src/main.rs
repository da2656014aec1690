use std::sync::Arc;

use clap::{Parser, Subcommand};
use coursebook::error::AppResult;
use coursebook::model::{DbConnection, ListingParams, ModelManager};
use coursebook::service::{DEFAULT_PAGE_SIZE, LessonsService};
use coursebook::web::dto::lessons::LessonRequest;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for managing the lesson catalogue", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },
}

/// Lesson management
#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    Add {
        #[arg(long)]
        title: String,
        /// Path to a Markdown file with the introduction
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        course_id: i32,
    },
    Update {
        #[arg(long)]
        id: i32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        course_id: i32,
    },
    Show {
        #[arg(long)]
        id: i32,
    },
    Delete {
        #[arg(long)]
        id: i32,
    },
    List {
        /// title_desc, date_created or date_created_desc
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        course_id: Option<i32>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: i64,
    },
}

fn read_introduction(file: Option<String>) -> std::io::Result<Option<String>> {
    file.map(std::fs::read_to_string).transpose()
}

fn validated(request: LessonRequest) -> Result<LessonRequest, &'static str> {
    if request.is_valid() {
        Ok(request)
    } else {
        Err("title must not be empty")
    }
}

fn require_valid(request: LessonRequest) -> LessonRequest {
    validated(request).unwrap_or_else(|reason| {
        eprintln!("Invalid lesson: {reason}");
        std::process::exit(2);
    })
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        eprintln!("DATABASE_URL is not set");
        std::process::exit(2);
    });

    let db_con = DbConnection::connect(&database_url)?;
    db_con.migrate().await?;
    let store = Arc::new(ModelManager::new(db_con));

    let Commands::Lesson { action } = args.command;
    match action {
        LessonCommands::Add { title, file, course_id } => {
            let lessons = LessonsService::new(store, DEFAULT_PAGE_SIZE);
            let request = require_valid(LessonRequest {
                title,
                introduction: read_introduction(file)?,
                course_id,
            });
            let result = lessons.create(request).await?;
            println!("Lesson created: {:?}", result);
        }

        LessonCommands::Update { id, title, file, course_id } => {
            let lessons = LessonsService::new(store, DEFAULT_PAGE_SIZE);
            let request = require_valid(LessonRequest {
                title,
                introduction: read_introduction(file)?,
                course_id,
            });
            let rows = lessons.update(id, request).await?;
            println!("Lesson {} updated, {} row(s)", id, rows);
        }

        LessonCommands::Show { id } => {
            let lessons = LessonsService::new(store, DEFAULT_PAGE_SIZE);
            match lessons.get_by_id(id).await? {
                Some(lesson) => println!("{:#?}", lesson),
                None => println!("Lesson {} not found", id),
            }
        }

        LessonCommands::Delete { id } => {
            let lessons = LessonsService::new(store, DEFAULT_PAGE_SIZE);
            let rows = lessons.delete(id).await?;
            println!("Lesson {} deleted, {} row(s)", id, rows);
        }

        LessonCommands::List { sort, search, course_id, page, page_size } => {
            let lessons = LessonsService::new(store, page_size);
            let listing = lessons
                .get_all_filter(ListingParams {
                    sort_order: sort,
                    current_sort: None,
                    current_filter: search,
                    search_string: None,
                    course_id,
                    page_number: page,
                })
                .await?;

            for lesson in &listing.page.items {
                println!(
                    "{:>6}  {:<40}  course {:<6}  {}",
                    lesson.id,
                    lesson.title,
                    lesson.course_id,
                    lesson.date_created.format("%Y-%m-%d %H:%M")
                );
            }
            println!(
                "page {}/{} ({} lessons, sort {})",
                listing.page.page_index,
                listing.page.total_pages,
                listing.page.total_items,
                listing.current_sort.as_param()
            );
        }
    }

    Ok(())
}
