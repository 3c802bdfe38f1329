use serde::{Deserialize, Serialize};

use crate::entities::dates::{EndDate, MonthYear};
use crate::entities::Resource;

/// Work history entry. Listed on the landing page; there is no form for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub start_date: MonthYear,
    pub end_date: EndDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
}

impl Resource for Experience {
    const PATH: &'static str = "/resume/experience";
    const NAME: &'static str = "experience";
    const PLURAL: &'static str = "experiences";
}
