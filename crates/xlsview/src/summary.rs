//! Document summary information

use xlsview_biff::RawSummaryInfo;

/// Document properties from the OLE summary streams
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SummaryInfo {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub comment: Option<String>,
    pub last_author: Option<String>,
    pub app_name: Option<String>,
    pub category: Option<String>,
    pub manager: Option<String>,
    pub company: Option<String>,
}

impl From<RawSummaryInfo> for SummaryInfo {
    fn from(raw: RawSummaryInfo) -> Self {
        Self {
            title: raw.title,
            subject: raw.subject,
            author: raw.author,
            keywords: raw.keywords,
            comment: raw.comment,
            last_author: raw.last_author,
            app_name: raw.app_name,
            category: raw.category,
            manager: raw.manager,
            company: raw.company,
        }
    }
}
