use super::theme::Keepsake;
use keepsake_core::anniversary::Anniversary;
use keepsake_core::calendar::{DayCell, MonthGrid, WEEKDAY_LABELS};
use keepsake_core::entry::Entry;
use keepsake_core::gallery::LoadIssue;
use keepsake_core::render::{
    LetterSize, card_title, empty_state_text, format_capsule, format_card_prefix,
    format_detail_title, format_month_label, letter_size,
};
use keepsake_core::season::Season;
use keepsake_core::tone::Overlay;
use keepsake_core::view::{EmptyState, GalleryView, TimelineItem};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
    pub season: Season,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        let opts = config.unwrap_or(RenderOptions {
            use_color: true,
            season: Season::Winter,
        });
        Self {
            skin: Keepsake::skin(opts.season),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{}", md.trim_end());
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_welcome(&self) {
        self.print_md(
            "# Welcome to keepsake\n\
             One photo a day, one letter each. Use `--on <date>`, `--step <days>` \
             or `--month YYYY-MM` to look around, and `--timeline` for the whole story.\n",
        );
    }

    pub fn print_anniversary(&self, anniversary: &Anniversary) {
        let title = anniversary.title.unwrap_or(anniversary.name);
        let line = format!("✦ {title} ✦");
        if self.opts.use_color {
            let color = anniversary
                .colors
                .first()
                .and_then(|hex| keepsake_core::tone::Rgb::from_hex(hex))
                .map(Keepsake::rgb)
                .unwrap_or(Keepsake::GOLD);
            println!("{}", line.with(color).bold());
        } else {
            println!("{line}");
        }
    }

    pub fn print_month_header(&self, grid: &MonthGrid) {
        self.print_md(&format!("# {}", format_month_label(grid.month)));
    }

    pub fn print_grid(&self, grid: &MonthGrid) {
        for line in grid_lines(grid, self.opts.use_color) {
            println!("{line}");
        }
    }

    /// Detail pane for the selected entry.
    pub fn print_entry_detail(&self, view: &GalleryView, entry: &Entry) {
        let day = view.day_number(entry.date);
        let mut md = format!(
            "## {}\n*{}*\n",
            format_detail_title(entry.date),
            format_capsule(day, entry.date)
        );
        if !entry.title.trim().is_empty() {
            md.push_str(&format!("**{}**\n", entry.title.trim()));
        }
        if !entry.description.trim().is_empty() {
            md.push_str(&format!("{}\n", entry.description.trim()));
        }
        let letter = entry.letter_text();
        md.push_str(&match letter_size(letter) {
            LetterSize::ExtraLarge => format!("\n> **{letter}**\n"),
            LetterSize::Large => format!("\n> *{letter}*\n"),
            LetterSize::Normal => format!("\n> {letter}\n"),
        });
        md.push_str(&format!("\n`images/{}`\n", entry.filename));
        self.print_md(&md);
    }

    /// One line per entry of the month, newest first.
    pub fn print_month_cards(&self, view: &GalleryView, entries: &[Entry], selected: &Entry) {
        for entry in entries {
            let line = card_line(view, entry);
            if !self.opts.use_color {
                let marker = if entry.date == selected.date { ">" } else { " " };
                println!("{marker} {line}");
            } else if entry.date == selected.date {
                println!("  {}", line.with(Keepsake::accent(self.opts.season)).bold());
            } else {
                println!("  {}", line.with(Keepsake::FG));
            }
        }
    }

    pub fn print_empty(&self, empty: &EmptyState) {
        let (title, line) = empty_state_text(empty);
        self.print_md(&format!("## {title}\n*{line}*\n"));
    }

    pub fn print_overlay(&self, overlay: &Overlay) {
        if self.opts.use_color {
            println!(
                "{}{} tone {}",
                "███".with(Keepsake::rgb(overlay.toned)),
                "███".with(Keepsake::rgb(overlay.base)),
                overlay.toned.to_hex().with(Keepsake::COMMENT)
            );
        } else {
            println!("tone {} on {}", overlay.toned.to_hex(), overlay.base.to_hex());
        }
        println!("{}", overlay.to_css());
    }

    pub fn print_timeline(&self, view: &GalleryView, items: &[TimelineItem]) {
        for item in items {
            match item {
                TimelineItem::Entry { entry, number } => {
                    let badge = format!("No. {number:03}");
                    let capsule = format_capsule(view.day_number(entry.date), entry.date);
                    let title = card_title(entry);
                    if self.opts.use_color {
                        println!(
                            "{} {} {}",
                            badge.with(Keepsake::GOLD),
                            capsule.with(Color::Cyan),
                            title.with(Keepsake::FG)
                        );
                    } else {
                        println!("{badge} {capsule} {title}");
                    }
                }
                TimelineItem::Placeholder(date) => {
                    let line = format!("  ...  {} still to come", date.format("%b %-d"));
                    if self.opts.use_color {
                        println!("{}", line.with(Keepsake::COMMENT));
                    } else {
                        println!("{line}");
                    }
                }
            }
        }
    }

    pub fn print_load_issues(&self, issues: &[LoadIssue]) {
        if issues.is_empty() {
            return;
        }
        self.print_md("\n# Notes:");
        for issue in issues {
            self.print_md(&format!("* {}", describe_issue(issue)));
        }
    }
}

fn card_line(view: &GalleryView, entry: &Entry) -> String {
    let day = view.day_number(entry.date);
    let prefix = match view.sequence_number(entry.date) {
        Some(number) => format_card_prefix(day, number),
        None => format!("Day {day:02}"),
    };
    format!("{prefix}  {}", card_title(entry))
}

fn describe_issue(issue: &LoadIssue) -> String {
    match issue {
        LoadIssue::SourceFailed { path, error } => {
            format!("Could not use '{}': {error}", path.display())
        }
        LoadIssue::RepairedDate {
            index,
            input,
            assigned,
        } => format!(
            "Record {index} has date {:?}; showing it on {assigned}",
            input.as_deref().unwrap_or("")
        ),
        LoadIssue::DuplicateDate {
            date,
            dropped_filename,
        } => format!("Two records share {date}; '{dropped_filename}' was replaced"),
    }
}

/// Sunday-first calendar rows.
///
/// Without colour each cell is five columns wide: `*` marks a day with a photo,
/// `.` a day still to come, `[ ]` the selection, `( )` today and `{ }` both.
fn grid_lines(grid: &MonthGrid, use_color: bool) -> Vec<String> {
    let mut lines = vec![
        WEEKDAY_LABELS
            .iter()
            .map(|label| if use_color { format!(" {label} ") } else { format!(" {label}  ") })
            .collect::<String>()
            .trim_end()
            .to_string(),
    ];
    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(cell) => cell_text(cell, use_color),
                None if use_color => "    ".to_string(),
                None => "     ".to_string(),
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }
    lines
}

fn cell_text(cell: &DayCell, use_color: bool) -> String {
    let day = cell.day();
    if !use_color {
        let (open, close) = match (cell.selected, cell.today) {
            (true, true) => ('{', '}'),
            (true, false) => ('[', ']'),
            (false, true) => ('(', ')'),
            (false, false) => (' ', ' '),
        };
        let mark = if cell.has_content {
            '*'
        } else if cell.future {
            '.'
        } else {
            ' '
        };
        return format!("{open}{day:>2}{mark}{close}");
    }
    let text = format!(" {day:>2} ");
    let styled = if cell.has_content {
        text.with(Keepsake::GOLD).bold()
    } else if cell.future {
        text.with(Keepsake::COMMENT)
    } else {
        text.with(Keepsake::FG)
    };
    let styled = if cell.today { styled.underlined() } else { styled };
    let styled = if cell.selected { styled.reverse() } else { styled };
    styled.to_string()
}
