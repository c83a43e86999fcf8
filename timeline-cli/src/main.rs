use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use timeline_core::{current_year, today, ConfigPatch, EventDraft, SaveOutcome, TimelineStore};
use timeline_render::{export_file_name, export_png, render_svg, ExportOptions};
use tracing_subscriber::EnvFilter;

mod file_store;

use file_store::JsonFileStore;

#[derive(Parser, Debug)]
#[command(
    name = "life-timeline",
    about = "Ghi lại các sự kiện quan trọng trong đời và xuất timeline thành ảnh."
)]
struct Args {
    /// File JSON lưu dữ liệu (tương đương localStorage).
    #[arg(short, long, env = "LIFE_TIMELINE_DATA", default_value = "life-timeline.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Liệt kê sự kiện theo thứ tự thời gian.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Thêm sự kiện mới.
    Add {
        #[arg(short, long)]
        title: String,
        /// Ngày dạng YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,
        #[arg(short, long, default_value_t = 50)]
        significance: u8,
        #[arg(short, long)]
        color: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Sửa sự kiện theo id; chỉ các trường được truyền mới thay đổi.
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        significance: Option<u8>,
        #[arg(short, long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Xóa một sự kiện.
    Delete { id: String },
    /// Xóa toàn bộ dữ liệu và đặt lại cài đặt.
    Clear {
        /// Xác nhận thao tác không thể hoàn tác.
        #[arg(long)]
        yes: bool,
    },
    /// Xem hoặc chỉnh cài đặt timeline.
    Config {
        #[arg(long)]
        start_year: Option<i32>,
        #[arg(long)]
        end_year: Option<i32>,
        /// Pixel mỗi năm (50-200).
        #[arg(long)]
        year_spacing: Option<u32>,
        #[arg(long)]
        show_future_years: Option<bool>,
        #[arg(long)]
        highlight_current_year: Option<bool>,
    },
    /// In layout đã tính dưới dạng JSON.
    Layout,
    /// Xuất timeline thành PNG (hoặc SVG).
    Export {
        /// Mặc định: life-timeline-YYYY-MM-DD.png
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = timeline_render::DEFAULT_EXPORT_SCALE)]
        scale: f32,
        #[arg(long)]
        no_watermark: bool,
        /// Ghi cảnh SVG thay vì ảnh PNG.
        #[arg(long)]
        svg: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let kv = JsonFileStore::open(&args.data)
        .with_context(|| format!("Không mở được file dữ liệu {:?}", args.data))?;
    tracing::debug!(path = %kv.path().display(), "data file opened");
    let year = current_year();
    let mut store = TimelineStore::load(kv, year);

    match args.command {
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.events())?);
            } else if store.events().is_empty() {
                println!("Chưa có sự kiện nào.");
            } else {
                for event in store.events() {
                    println!(
                        "[{}] {} | {} | Significance: {}%",
                        event.id,
                        event.title,
                        event.date.format("%B %-d, %Y"),
                        event.significance
                    );
                    if !event.description.is_empty() {
                        println!("    {}", event.description);
                    }
                }
            }
        }
        Command::Add {
            title,
            date,
            significance,
            color,
            description,
        } => {
            let mut draft = EventDraft::blank(date);
            draft.title = title;
            draft.significance = significance;
            draft.description = description;
            if color.is_some() {
                draft.color = color;
            }
            let event = draft.validate()?;
            let (id, title) = (event.id.clone(), event.title.clone());
            store.save_event(event, year)?;
            tracing::info!(%id, "event added");
            println!("\"{title}\" has been added to your timeline. (id: {id})");
        }
        Command::Edit {
            id,
            title,
            date,
            significance,
            color,
            description,
        } => {
            let existing = store
                .event(&id)
                .with_context(|| format!("Không tìm thấy sự kiện {id}"))?;
            let mut draft = EventDraft::from_event(existing);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(significance) = significance {
                draft.significance = significance;
            }
            if let Some(color) = color {
                draft.color = Some(color);
            }
            if let Some(description) = description {
                draft.description = description;
            }
            let event = draft.validate()?;
            let title = event.title.clone();
            match store.save_event(event, year)? {
                SaveOutcome::Updated => println!("\"{title}\" has been updated."),
                SaveOutcome::Added => println!("\"{title}\" has been added to your timeline."),
            }
        }
        Command::Delete { id } => {
            let removed = store.delete_event(&id)?;
            println!("\"{}\" has been removed from your timeline.", removed.title);
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("Thao tác này xóa toàn bộ sự kiện và cài đặt; chạy lại với --yes để xác nhận");
            }
            store.clear_all(year)?;
            println!("All data cleared. Your timeline has been reset.");
        }
        Command::Config {
            start_year,
            end_year,
            year_spacing,
            show_future_years,
            highlight_current_year,
        } => {
            let patch = ConfigPatch {
                start_year,
                end_year,
                year_spacing,
                show_future_years,
                highlight_current_year,
            };
            if !patch.is_empty() {
                store.update_config(&patch, year)?;
            }
            println!("{}", serde_json::to_string_pretty(store.config())?);
        }
        Command::Layout => {
            println!("{}", serde_json::to_string_pretty(&store.layout(year))?);
        }
        Command::Export {
            output,
            scale,
            no_watermark,
            svg,
        } => {
            let layout = store.layout(year);
            let mut opts = ExportOptions {
                scale,
                ..ExportOptions::default()
            };
            if no_watermark {
                opts.watermark = None;
            }

            let default_name = export_file_name(today());
            let output = output.unwrap_or_else(|| {
                if svg {
                    PathBuf::from(default_name.replace(".png", ".svg"))
                } else {
                    PathBuf::from(default_name)
                }
            });

            let bytes = if svg {
                render_svg(&layout, &opts.style).into_bytes()
            } else {
                export_png(&layout, &opts).context("Xuất ảnh thất bại")?
            };

            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Không tạo được thư mục {:?}", parent))?;
            }
            std::fs::write(&output, bytes)
                .with_context(|| format!("Không ghi được file {:?}", output))?;
            if !layout.skipped.is_empty() {
                tracing::warn!(
                    count = layout.skipped.len(),
                    "some events fall outside the configured year range"
                );
            }
            println!("Your timeline has been saved to {}", output.display());
        }
    }

    Ok(())
}
