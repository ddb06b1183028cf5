//! Dashboard cards: the four stock counters side by side.

use crate::ui::helpers::{char_width, clip, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DashboardCards;

/// Renders the counters evenly across the pane at `row`.
///
/// ```text
///   Total de Produtos: 231   Estoque OK: 198   Estoque Baixo: 21   Esgotados: 12
/// ```
pub fn render_dashboard(row: usize, cards: &DashboardCards, theme: &Theme, cols: usize) -> usize {
    let entries = [
        ("Total de Produtos", cards.total.as_str(), theme.colors.header_fg.as_str()),
        ("Estoque OK", cards.ok.as_str(), theme.colors.status_ok_fg.as_str()),
        ("Estoque Baixo", cards.low.as_str(), theme.colors.status_low_fg.as_str()),
        ("Esgotados", cards.depleted.as_str(), theme.colors.status_depleted_fg.as_str()),
    ];
    let card_width = cols / entries.len();

    position_cursor(row, 1);
    for (label, value, color) in entries {
        let text = format!("{label}: {value}");
        let width = char_width(&text);
        if width > card_width {
            print!("{}{}", Theme::fg(color), clip(&text, card_width));
            continue;
        }
        let left = (card_width - width) / 2;
        let right = card_width - width - left;

        print!("{}", " ".repeat(left));
        print!("{}{label}: ", Theme::fg(&theme.colors.card_label_fg));
        print!("{}{}{value}{}", Theme::bold(), Theme::fg(color), Theme::reset());
        print!("{}", " ".repeat(right));
    }
    print!("{}", " ".repeat(cols.saturating_sub(card_width * entries.len())));
    print!("{}", Theme::reset());
    row + 1
}
