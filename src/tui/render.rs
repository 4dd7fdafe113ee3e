use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::util::{fmt_size, truncate_path};

const COL_MARK_W: usize = 2;
const COL_SIZE_W: usize = 10;
const COL_STATUS_W: usize = 12;
const COL_SEP: usize = 2;

const MARK_GLYPH: &str = "\u{25cf} ";

fn path_col_width(width: usize) -> usize {
    width
        .saturating_sub(COL_MARK_W + COL_SIZE_W + COL_STATUS_W + COL_SEP * 2 + 2)
        .max(20)
}

/// Paints one full frame: banner, column headers, table body, separator,
/// summary, key hints, and the confirmation dialog when one is pending.
///
/// The body height measured here is stored on the app so navigation pages
/// by the real viewport. Everything is clipped to the frame; an undersized
/// terminal just shows fewer rows.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title banner
            Constraint::Length(1), // column headers
            Constraint::Min(1),    // table body
            Constraint::Length(1), // separator
            Constraint::Length(1), // summary
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    app.set_viewport(chunks[2].height as usize);
    app.clamp();

    let width = frame.area().width as usize;

    draw_banner(frame, chunks[0], app);
    draw_headers(frame, chunks[1], width);
    draw_body(frame, chunks[2], app, width);

    frame.render_widget(
        Paragraph::new(Line::from("\u{2500}".repeat(width))),
        chunks[3],
    );
    draw_summary(frame, chunks[4], app);
    frame.render_widget(
        Paragraph::new(Line::from(
            "  [\u{2191}\u{2193}/jk] Navigate  [Space] Mark  [D] Delete marked (or current)  [Q/Esc] Quit",
        )),
        chunks[5],
    );

    if app.confirm_targets().is_some() {
        draw_confirm(frame, app);
    }
}

fn draw_banner(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let banner = format!("  modsweep  Root: {}", app.root.display());
    frame.render_widget(
        Paragraph::new(Line::from(banner).style(Style::default().add_modifier(Modifier::BOLD))),
        area,
    );
}

fn draw_headers(frame: &mut Frame<'_>, area: Rect, width: usize) {
    let path_w = path_col_width(width);
    let header = format!(
        "{:mark$}{:<path_w$}  {:>size$}  {:<status$}",
        "",
        "PATH",
        "SIZE",
        "STATUS",
        mark = COL_MARK_W,
        size = COL_SIZE_W,
        status = COL_STATUS_W,
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(header)
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
        ),
        area,
    );
}

fn draw_body(frame: &mut Frame<'_>, area: Rect, app: &App, width: usize) {
    let records = app.store().records();

    if records.is_empty() {
        if app.scan_state().is_scanning() {
            let notice = format!("  Scanning for {}...", app.marker);
            frame.render_widget(
                Paragraph::new(Line::from(notice).style(Style::default().add_modifier(Modifier::DIM))),
                area,
            );
        }
        return;
    }

    let path_w = path_col_width(width);
    let viewport = area.height as usize;
    let mut lines = Vec::with_capacity(viewport);

    for row in 0..viewport {
        let index = app.scroll() + row;
        let record = match records.get(index) {
            Some(record) => record,
            None => break,
        };

        let glyph = if record.marked { MARK_GLYPH } else { "  " };
        let text = format!(
            "{glyph}{:<path_w$}  {:>size$}  {:<status$}",
            truncate_path(&record.display_path, path_w),
            record.size_label,
            record.status,
            size = COL_SIZE_W,
            status = COL_STATUS_W,
        );

        let mut style = Style::default();
        if record.deleted {
            style = style.add_modifier(Modifier::DIM);
        }
        if record.marked {
            style = style.add_modifier(Modifier::BOLD);
        }
        if index == app.selected() {
            style = style.add_modifier(Modifier::REVERSED);
        }

        lines.push(Line::from(text).style(style));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_summary(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let store = app.store();
    let total = fmt_size(store.total_active_kib());
    let count = store.len();
    let plural = if count == 1 { "" } else { "s" };
    let marked = match store.marked_count() {
        0 => String::new(),
        n => format!("  [{n} marked]"),
    };
    let scanning = if app.scan_state().is_scanning() {
        "  [scanning...]"
    } else {
        ""
    };

    let summary = format!(
        "  Total: {total}  ({count} folder{plural}, {active} active){marked}{scanning}",
        active = store.active_count(),
    );
    frame.render_widget(
        Paragraph::new(Line::from(summary).style(Style::default().add_modifier(Modifier::BOLD))),
        area,
    );
}

fn draw_confirm(frame: &mut Frame<'_>, app: &App) {
    let records = app.confirm_records();
    if records.is_empty() {
        return;
    }

    let frame_area = frame.area();
    let box_w = (frame_area.width.saturating_sub(4)).min(70);
    let box_h: u16 = 7;
    if box_w < 10 || frame_area.height < box_h {
        return;
    }

    let area = Rect::new(
        (frame_area.width - box_w) / 2,
        (frame_area.height - box_h) / 2,
        box_w,
        box_h,
    );
    let inner = box_w.saturating_sub(4) as usize;

    let body = if let [only] = records.as_slice() {
        vec![
            Line::from(format!(" {}", truncate_path(&only.display_path, inner))),
            Line::from(format!(" Size: {}", only.size_label)),
        ]
    } else {
        let total_kib: u64 = records.iter().map(|record| record.size_kib).sum();
        vec![
            Line::from(format!(" {} folders selected", records.len())),
            Line::from(format!(" Total: {}", fmt_size(total_kib))),
        ]
    };

    let mut text = vec![Line::from("")];
    text.extend(body);
    text.push(Line::from(""));
    text.push(
        Line::from("[Y] Delete   [Any other key] Cancel")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Delete "),
        ),
        area,
    );
}
