//! Modal dialog renderer.
//!
//! Modals are drawn last, as a bordered box centered over the dashboard (see
//! [`layout::modal_area`]). The box content is first laid out as styled lines
//! and then painted, so the layout can be tested without a terminal.

use crate::domain::MovementKind;
use crate::ui::helpers::{pad_left, pad_right, position_cursor};
use crate::ui::layout::{self, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormView, HistoryView, ModalView};

const LABEL_WIDTH: usize = 16;
const KIND_WIDTH: usize = 8;
const QUANTITY_WIDTH: usize = 8;
const DATE_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Title,
    Subtitle,
    Plain,
    Focused,
    Header,
    Movement(MovementKind),
    Hint,
}

type Line = (String, LineStyle);

/// Paints `modal` centered in a pane of `rows` x `cols`.
pub fn render_modal(modal: &ModalView, theme: &Theme, rows: usize, cols: usize) {
    let area = layout::modal_area(rows, cols, modal.kind());
    let inner = area.width.saturating_sub(2);
    let lines = match modal {
        ModalView::Form(form) => form_lines(form),
        ModalView::History(history) => history_lines(history, area.height.saturating_sub(2)),
    };

    draw_frame(area, theme);
    for (offset, (text, style)) in lines.iter().take(area.height.saturating_sub(2)).enumerate() {
        position_cursor(area.row + 1 + offset, area.col + 1);
        print!("{}", background(theme));
        print!("{}", line_color(*style, theme));
        print!("{}", pad_right(text, inner));
        print!("{}", Theme::reset());
    }
}

fn background(theme: &Theme) -> String {
    theme
        .colors
        .modal_bg
        .as_deref()
        .map_or_else(String::new, Theme::bg)
}

fn line_color(style: LineStyle, theme: &Theme) -> String {
    let colors = &theme.colors;
    match style {
        LineStyle::Title => format!("{}{}", Theme::bold(), Theme::fg(&colors.header_fg)),
        LineStyle::Subtitle => Theme::fg(&colors.card_label_fg),
        LineStyle::Plain => Theme::fg(&colors.text_normal),
        LineStyle::Focused => format!("{}{}", Theme::bold(), Theme::fg(&colors.focused_field_fg)),
        LineStyle::Header => format!("{}{}", Theme::bold(), Theme::fg(&colors.text_dim)),
        LineStyle::Movement(MovementKind::Entry) => Theme::fg(&colors.status_ok_fg),
        LineStyle::Movement(MovementKind::Exit) => Theme::fg(&colors.status_depleted_fg),
        LineStyle::Hint => Theme::fg(&colors.text_dim),
    }
}

/// Border plus a blank interior, so the dashboard underneath does not show through.
fn draw_frame(area: Rect, theme: &Theme) {
    let inner = area.width.saturating_sub(2);
    let border = format!("{}{}", background(theme), Theme::fg(&theme.colors.modal_border));

    position_cursor(area.row, area.col);
    print!("{border}╭{}╮{}", "─".repeat(inner), Theme::reset());
    for offset in 1..area.height.saturating_sub(1) {
        position_cursor(area.row + offset, area.col);
        print!("{border}│{}│{}", " ".repeat(inner), Theme::reset());
    }
    if area.height > 1 {
        position_cursor(area.row + area.height - 1, area.col);
        print!("{border}╰{}╯{}", "─".repeat(inner), Theme::reset());
    }
}

fn form_lines(form: &FormView) -> Vec<Line> {
    let mut lines = vec![(format!(" {}", form.title), LineStyle::Title)];
    if let Some(subtitle) = &form.subtitle {
        lines.push((format!(" {subtitle}"), LineStyle::Subtitle));
    }
    lines.push((String::new(), LineStyle::Plain));

    for field in &form.fields {
        let (marker, cursor, style) = if field.focused {
            ("›", "▏", LineStyle::Focused)
        } else {
            (" ", "", LineStyle::Plain)
        };
        lines.push((
            format!(
                "{marker}{} {}{cursor}",
                pad_right(&format!("{}:", field.label), LABEL_WIDTH),
                field.value
            ),
            style,
        ));
    }

    lines.push((String::new(), LineStyle::Plain));
    lines.push((format!(" {}", form.hint), LineStyle::Hint));
    lines
}

/// Lays out the history table, keeping the hint on the last interior line.
fn history_lines(history: &HistoryView, interior: usize) -> Vec<Line> {
    let mut lines = vec![
        (format!(" {}", history.title), LineStyle::Title),
        (String::new(), LineStyle::Plain),
    ];

    if history.loading {
        lines.push((" Carregando...".to_string(), LineStyle::Subtitle));
    } else if history.entries.is_empty() {
        lines.push((" Nenhuma movimentação registrada".to_string(), LineStyle::Subtitle));
    } else {
        lines.push((
            format!(
                " {}{}  {}  OBSERVAÇÃO",
                pad_right("TIPO", KIND_WIDTH),
                pad_left("QTD", QUANTITY_WIDTH),
                pad_right("DATA", DATE_WIDTH)
            ),
            LineStyle::Header,
        ));
        let room = interior.saturating_sub(lines.len() + 2);
        for entry in history.entries.iter().take(room) {
            lines.push((
                format!(
                    " {}{}  {}  {}",
                    pad_right(&entry.kind_label, KIND_WIDTH),
                    pad_left(&entry.quantity, QUANTITY_WIDTH),
                    pad_right(&entry.date, DATE_WIDTH),
                    entry.note
                ),
                LineStyle::Movement(entry.kind),
            ));
        }
    }

    while lines.len() + 1 < interior {
        lines.push((String::new(), LineStyle::Plain));
    }
    lines.push((format!(" {}", history.hint), LineStyle::Hint));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::ModalKind;
    use crate::ui::viewmodel::{FieldView, HistoryEntryView};

    fn movement_form() -> FormView {
        FormView {
            kind: ModalKind::Movement,
            title: "Baixa de Estoque".to_string(),
            subtitle: Some("ARROZ 5KG".to_string()),
            fields: vec![
                FieldView {
                    label: "Quantidade".to_string(),
                    value: "3".to_string(),
                    focused: true,
                },
                FieldView {
                    label: "Observação".to_string(),
                    value: String::new(),
                    focused: false,
                },
            ],
            hint: "Enter: salvar  ESC: cancelar".to_string(),
        }
    }

    fn entry(kind: MovementKind) -> HistoryEntryView {
        HistoryEntryView {
            kind,
            kind_label: kind.label().to_string(),
            quantity: "2".to_string(),
            note: "nota".to_string(),
            date: "01/02/2024 10:30".to_string(),
        }
    }

    #[test]
    fn movement_form_fits_its_box() {
        let lines = form_lines(&movement_form());

        assert_eq!(lines.len(), layout::modal_height(ModalKind::Movement) - 2);
        assert_eq!(lines[1].1, LineStyle::Subtitle);
        assert_eq!(lines[3].1, LineStyle::Focused);
        assert!(lines[3].0.starts_with("›Quantidade:"));
        assert!(lines[3].0.ends_with("3▏"));
        assert_eq!(lines[4].1, LineStyle::Plain);
    }

    #[test]
    fn history_keeps_hint_on_last_line() {
        let history = HistoryView {
            title: "Movimentações · ARROZ".to_string(),
            loading: false,
            entries: vec![entry(MovementKind::Entry); 30],
            hint: "ESC: fechar".to_string(),
        };
        let interior = layout::modal_height(ModalKind::History) - 2;

        let lines = history_lines(&history, interior);

        assert_eq!(lines.len(), interior);
        assert_eq!(lines[interior - 1].1, LineStyle::Hint);
        assert_eq!(lines[3].1, LineStyle::Movement(MovementKind::Entry));
    }

    #[test]
    fn empty_history_says_so() {
        let history = HistoryView {
            title: "Movimentações · SAL".to_string(),
            loading: false,
            entries: Vec::new(),
            hint: "ESC: fechar".to_string(),
        };

        let lines = history_lines(&history, 15);

        assert!(lines[2].0.contains("Nenhuma movimentação"));
        assert_eq!(lines.len(), 15);
    }
}
