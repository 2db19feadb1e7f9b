//! Card view of a search result set.
//!
//! [`ResultsView::build`] is a pure function of the query and the rows the
//! store returned; it is rebuilt from scratch on every query change.

use passfinder_db::Facility;
use serde::Serialize;

/// Page title shown above the search input.
pub const PAGE_TITLE: &str = "🏯 오사카 주유패스 포함 시설 검색기";
/// One-line description under the title.
pub const PAGE_SUBTITLE: &str = "궁금한 시설의 이름, 카테고리, 주소 등으로 검색해보세요!";
pub const INPUT_LABEL: &str = "검색어 입력";
pub const INPUT_PLACEHOLDER: &str = "예: 오사카성, 박물관, 우메다";
pub const INPUT_HELP: &str = "시설명, 카테고리, 주소 등으로 검색 가능";

/// Notice rendered when nothing matched.
pub const NO_RESULTS: &str = "검색 결과가 없습니다.";

const ALL_FACILITIES: &str = "모든 시설 목록:";

const MISSING_NAME: &str = "이름 없음";
const MISSING_INFO: &str = "정보 없음";
const MISSING_REMARK: &str = "없음";

pub const LABEL_CATEGORY: &str = "카테고리";
pub const LABEL_REGION: &str = "지역";
pub const LABEL_ADDRESS: &str = "주소";
pub const LABEL_OPEN_DAYS: &str = "운영 요일";
pub const LABEL_OPEN_HOURS: &str = "운영 시간";
pub const LABEL_LAST_ENTRY: &str = "마지막 입장";
pub const LABEL_RESERVATION: &str = "예약 필요";
pub const LABEL_QR_PASS: &str = "QR패스 필요";
pub const LABEL_COST: &str = "원래 가격";
pub const LABEL_NOTES: &str = "참고";
pub const LABEL_CAUTION: &str = "주의";

/// Pass inclusion indicator on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Included,
    Excluded,
}

impl Badge {
    pub fn for_facility(facility: &Facility) -> Self {
        if facility.is_included() {
            Badge::Included
        } else {
            Badge::Excluded
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Badge::Included => "✅ 주유패스 포함",
            Badge::Excluded => "❌ 주유패스 미포함",
        }
    }
}

/// A labeled line on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardField {
    pub label: &'static str,
    pub value: String,
}

/// Display form of one facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityCard {
    pub title: String,
    pub badge: Badge,
    pub fields: Vec<CardField>,
}

impl FacilityCard {
    pub fn from_facility(facility: &Facility) -> Self {
        let info = |label, value: &Option<String>| CardField {
            label,
            value: display_or(value.as_deref(), MISSING_INFO),
        };
        let remark = |label, value: &Option<String>| CardField {
            label,
            value: display_or(value.as_deref(), MISSING_REMARK),
        };

        let open_hours = CardField {
            label: LABEL_OPEN_HOURS,
            value: facility
                .open_hours
                .as_deref()
                .map(escape_open_hours)
                .unwrap_or_else(|| MISSING_INFO.to_string()),
        };

        Self {
            title: display_or(facility.name_ko.as_deref(), MISSING_NAME),
            badge: Badge::for_facility(facility),
            fields: vec![
                info(LABEL_CATEGORY, &facility.category),
                info(LABEL_REGION, &facility.region),
                info(LABEL_ADDRESS, &facility.address),
                info(LABEL_OPEN_DAYS, &facility.open_days),
                open_hours,
                info(LABEL_LAST_ENTRY, &facility.last_entry),
                info(LABEL_RESERVATION, &facility.reservation),
                info(LABEL_QR_PASS, &facility.qr_pass),
                info(LABEL_COST, &facility.cost_original),
                remark(LABEL_NOTES, &facility.notes),
                remark(LABEL_CAUTION, &facility.caution),
            ],
        }
    }

    /// Value of the field with the given label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// What sits under the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsBody {
    Empty {
        notice: &'static str,
    },
    Cards {
        heading: String,
        cards: Vec<FacilityCard>,
    },
}

/// Rendered result page for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub query: Option<String>,
    pub status: String,
    pub body: ResultsBody,
}

impl ResultsView {
    pub fn build(query: Option<&str>, results: &[Facility]) -> Self {
        let query = query.filter(|q| !q.is_empty());

        let status = status_line(query);

        let body = if results.is_empty() {
            ResultsBody::Empty { notice: NO_RESULTS }
        } else {
            ResultsBody::Cards {
                heading: format!("총 {}개의 검색 결과", results.len()),
                cards: results.iter().map(FacilityCard::from_facility).collect(),
            }
        };

        Self {
            query: query.map(str::to_string),
            status,
            body,
        }
    }

    pub fn cards(&self) -> &[FacilityCard] {
        match &self.body {
            ResultsBody::Cards { cards, .. } => cards,
            ResultsBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, ResultsBody::Empty { .. })
    }
}

/// One-line message reflecting whether a query was supplied.
pub fn status_line(query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("'{}'(으)로 검색 중...", q),
        None => ALL_FACILITIES.to_string(),
    }
}

/// Substitute `placeholder` for an absent value.
pub fn display_or(value: Option<&str>, placeholder: &str) -> String {
    value.unwrap_or(placeholder).to_string()
}

/// Escape tildes so markdown renderers don't read them as strikethrough.
pub fn escape_open_hours(raw: &str) -> String {
    raw.replace('~', "\\~")
}
