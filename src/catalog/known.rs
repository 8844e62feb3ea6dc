//! Categories the merge tool is allowed to register on its own.
//!
//! Anything outside this table has to be added to `categories` by hand; the
//! merge tool only logs it as unknown.

use crate::catalog::identity::{CategoryId, CategoryRecord};

/// One row of the built-in category table.
#[derive(Clone, Copy, Debug)]
pub struct KnownCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

impl KnownCategory {
    pub fn record(&self) -> CategoryRecord {
        CategoryRecord {
            id: CategoryId(self.id.to_string()),
            name: self.name.to_string(),
            icon: self.icon.to_string(),
        }
    }
}

pub const KNOWN_CATEGORIES: &[KnownCategory] = &[
    KnownCategory { id: "cms", name: "CMS・コンテンツ管理", icon: "📝" },
    KnownCategory { id: "crm", name: "CRM・顧客管理", icon: "👥" },
    KnownCategory { id: "nocode", name: "ノーコード・自動化", icon: "⚡" },
    KnownCategory { id: "iot", name: "IoT・ハードウェア", icon: "📡" },
    KnownCategory { id: "travel", name: "旅行・交通", icon: "✈️" },
    KnownCategory { id: "food", name: "食・グルメ", icon: "🍽️" },
    KnownCategory { id: "logistics", name: "物流・配送", icon: "📦" },
    KnownCategory { id: "realestate", name: "不動産", icon: "🏠" },
    KnownCategory { id: "education", name: "教育・学習", icon: "📚" },
    KnownCategory { id: "blockchain", name: "ブロックチェーン・Web3", icon: "⛓️" },
    KnownCategory { id: "communication", name: "コミュニケーション", icon: "📹" },
    KnownCategory { id: "security", name: "セキュリティ", icon: "🛡️" },
];

/// Look up a category definition by id.
pub fn known_category(id: &str) -> Option<CategoryRecord> {
    KNOWN_CATEGORIES
        .iter()
        .find(|known| known.id == id)
        .map(KnownCategory::record)
}
