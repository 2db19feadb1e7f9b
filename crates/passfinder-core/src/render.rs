//! Text renderers for a [`ResultsView`].

use colored::Colorize;

use crate::view::{Badge, FacilityCard, ResultsBody, ResultsView, PAGE_SUBTITLE, PAGE_TITLE};

const CARD_RULE_WIDTH: usize = 48;

/// Render the full page as markdown.
pub fn render_markdown(view: &ResultsView) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", PAGE_TITLE));
    out.push_str(&format!("{}\n\n", PAGE_SUBTITLE));
    out.push_str(&format!("{}\n\n", view.status));

    match &view.body {
        ResultsBody::Empty { notice } => {
            out.push_str(&format!("> ⚠️ {}\n", notice));
        }
        ResultsBody::Cards { heading, cards } => {
            out.push_str(&format!("## {}\n", heading));
            for card in cards {
                out.push('\n');
                markdown_card(&mut out, card);
            }
        }
    }

    out
}

fn markdown_card(out: &mut String, card: &FacilityCard) {
    out.push_str("---\n\n");
    out.push_str(&format!("### {}\n\n", card.title));
    out.push_str(&format!("{}\n\n", card.badge.label()));

    // Blank line keeps each field its own paragraph
    let fields: Vec<String> = card
        .fields
        .iter()
        .map(|field| format!("**{}:** {}", field.label, field.value))
        .collect();
    out.push_str(&fields.join("\n\n"));
    out.push('\n');
}

/// Render the page as colored terminal text.
pub fn render_terminal(view: &ResultsView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", PAGE_TITLE.bold().bright_white()));
    out.push_str(&format!("{}\n\n", PAGE_SUBTITLE.dimmed()));
    out.push_str(&format!("{}\n", view.status));

    match &view.body {
        ResultsBody::Empty { notice } => {
            out.push_str(&format!("{} {}\n", "⚠".bright_yellow(), notice.bright_yellow()));
        }
        ResultsBody::Cards { heading, cards } => {
            out.push_str(&format!("{}\n", heading.bold()));
            for card in cards {
                terminal_card(&mut out, card);
            }
        }
    }

    out
}

fn terminal_card(out: &mut String, card: &FacilityCard) {
    out.push('\n');
    out.push_str(&format!("{}\n", "─".repeat(CARD_RULE_WIDTH).bright_blue()));
    out.push_str(&format!("{}\n", card.title.bold().bright_cyan()));

    let badge = match card.badge {
        Badge::Included => card.badge.label().bright_green(),
        Badge::Excluded => card.badge.label().bright_red(),
    };
    out.push_str(&format!("{}\n", badge));

    for field in &card.fields {
        out.push_str(&format!("  {} {}\n", format!("{}:", field.label).bold(), field.value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passfinder_db::Facility;

    fn sample_view() -> ResultsView {
        let rows = vec![Facility {
            name_ko: Some("오사카성".to_string()),
            included: Some("예".to_string()),
            category: Some("관광".to_string()),
            open_hours: Some("09:00~17:00".to_string()),
            ..Default::default()
        }];
        ResultsView::build(Some("오사카"), &rows)
    }

    #[test]
    fn test_markdown_card_layout() {
        let md = render_markdown(&sample_view());
        assert!(md.starts_with("# 🏯 오사카 주유패스 포함 시설 검색기\n"));
        assert!(md.contains("'오사카'(으)로 검색 중...\n"));
        assert!(md.contains("## 총 1개의 검색 결과\n"));
        assert!(md.contains("---\n\n### 오사카성\n\n✅ 주유패스 포함\n\n**카테고리:** 관광\n\n"));
        assert!(md.contains(r"**운영 시간:** 09:00\~17:00"));
        assert!(md.ends_with("**주의:** 없음\n"));
    }

    #[test]
    fn test_markdown_no_results() {
        let md = render_markdown(&ResultsView::build(Some("museum"), &[]));
        assert!(md.contains("검색 결과가 없습니다."));
        assert!(!md.contains("###"));
    }

    #[test]
    fn test_markdown_empty_page_exact() {
        let md = render_markdown(&ResultsView::build(None, &[]));
        assert_eq!(
            md,
            "# 🏯 오사카 주유패스 포함 시설 검색기\n\n\
             궁금한 시설의 이름, 카테고리, 주소 등으로 검색해보세요!\n\n\
             모든 시설 목록:\n\n\
             > ⚠️ 검색 결과가 없습니다.\n"
        );
    }

    #[test]
    fn test_terminal_plain_text() {
        colored::control::set_override(false);
        let text = render_terminal(&sample_view());
        colored::control::unset_override();

        assert!(text.contains("총 1개의 검색 결과"));
        assert!(text.contains("오사카성\n✅ 주유패스 포함\n"));
        assert!(text.contains("  카테고리: 관광\n"));
        assert!(text.contains("  참고: 없음\n"));
    }
}
