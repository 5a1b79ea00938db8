use chrono::NaiveDate;

use super::CatalogDocument;
use crate::marketplace::domain::{
    Article, ArticleId, EngagementLength, ListingId, ListingRecord, Organization, OrganizationId,
    WorkStyle,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn organization(
    id: &str,
    name: &str,
    industry: &str,
    location: &str,
    description: &str,
    employee_count: u32,
) -> Organization {
    Organization {
        id: OrganizationId::new(id),
        name: name.to_string(),
        industry: industry.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        website: Some(format!("https://example.jp/{id}")),
        employee_count: Some(employee_count),
    }
}

struct Posting<'a> {
    id: &'a str,
    organization_id: &'a str,
    title: &'a str,
    description: &'a str,
    tags: &'a [&'a str],
    skills: &'a [&'a str],
    location: &'a str,
    salary: &'a str,
    work_style: WorkStyle,
    engagement: EngagementLength,
    posted_on: NaiveDate,
}

impl Posting<'_> {
    fn record(self) -> ListingRecord {
        ListingRecord {
            id: ListingId::new(self.id),
            organization_id: OrganizationId::new(self.organization_id),
            title: self.title.to_string(),
            description: self.description.to_string(),
            tags: strings(self.tags),
            skills: strings(self.skills),
            location: self.location.to_string(),
            salary: self.salary.to_string(),
            work_style: self.work_style,
            engagement: self.engagement,
            posted_on: self.posted_on,
        }
    }
}

pub(super) fn sample_document() -> CatalogDocument {
    let organizations = vec![
        organization(
            "org-cloudbridge",
            "株式会社クラウドブリッジ",
            "IT・ソフトウェア",
            "東京都渋谷区",
            "中小企業向けのクラウド業務システムを開発・提供しています。",
            85,
        ),
        organization(
            "org-miraimedia",
            "株式会社ミライメディア",
            "広告・メディア",
            "大阪府大阪市",
            "若者向けWebメディアの運営とSNSマーケティング支援を行っています。",
            40,
        ),
        organization(
            "org-datawave",
            "株式会社データウェーブ",
            "コンサルティング",
            "東京都千代田区",
            "データ活用による経営改善を支援するコンサルティングファームです。",
            120,
        ),
        organization(
            "org-globaltrade",
            "株式会社グローバルトレード",
            "商社",
            "福岡県福岡市",
            "アジア圏を中心に食品と雑貨の輸出入を手がけています。",
            300,
        ),
        organization(
            "org-fincore",
            "株式会社フィンコア",
            "金融・FinTech",
            "東京都港区",
            "決済インフラと資産管理サービスを提供するFinTech企業です。",
            60,
        ),
    ];

    let listings = vec![
        Posting {
            id: "job-001",
            organization_id: "org-cloudbridge",
            title: "Go言語を用いたバックエンド開発インターン",
            description: "自社SaaSのAPI開発を担当します。コードレビューを通じて実務の設計を学べます。",
            tags: &["Go", "バックエンド", "エンジニア"],
            skills: &["Go", "PostgreSQL", "Docker"],
            location: "東京都渋谷区",
            salary: "時給 1,800円〜",
            work_style: WorkStyle::Remote,
            engagement: EngagementLength::LongTerm,
            posted_on: date(2025, 4, 1),
        },
        Posting {
            id: "job-002",
            organization_id: "org-miraimedia",
            title: "Webマーケティングアシスタント",
            description: "SNS運用と記事の効果測定を担当します。週2日から勤務可能です。",
            tags: &["マーケティング", "SNS", "未経験歓迎"],
            skills: &["Excel"],
            location: "大阪府大阪市",
            salary: "時給 1,200円〜",
            work_style: WorkStyle::Hybrid,
            engagement: EngagementLength::LongTerm,
            posted_on: date(2025, 4, 3),
        },
        Posting {
            id: "job-003",
            organization_id: "org-cloudbridge",
            title: "React/TypeScriptフロントエンドエンジニア",
            description: "管理画面の新機能開発に参加します。デザイナーと連携して画面を作ります。",
            tags: &["フロントエンド", "React", "TypeScript", "エンジニア"],
            skills: &["TypeScript", "React"],
            location: "東京都渋谷区",
            salary: "時給 1,500円〜",
            work_style: WorkStyle::Hybrid,
            engagement: EngagementLength::LongTerm,
            posted_on: date(2025, 4, 5),
        },
        Posting {
            id: "job-004",
            organization_id: "org-datawave",
            title: "データ分析インターン（Python）",
            description: "クライアントの販売データを分析し、レポートを作成します。",
            tags: &["データサイエンス", "Python", "分析"],
            skills: &["Python", "SQL"],
            location: "東京都千代田区",
            salary: "時給 2,000円",
            work_style: WorkStyle::Remote,
            engagement: EngagementLength::ShortTerm,
            posted_on: date(2025, 4, 8),
        },
        Posting {
            id: "job-005",
            organization_id: "org-globaltrade",
            title: "法人営業インターン",
            description: "海外取引先との商談準備や提案資料の作成をサポートします。",
            tags: &["営業", "未経験歓迎"],
            skills: &[],
            location: "福岡県福岡市",
            salary: "日給 10,000円",
            work_style: WorkStyle::Onsite,
            engagement: EngagementLength::ShortTerm,
            posted_on: date(2025, 4, 10),
        },
        Posting {
            id: "job-006",
            organization_id: "org-miraimedia",
            title: "UI/UXデザイナーインターン",
            description: "メディアサイトの改善提案からプロトタイプ作成まで担当します。",
            tags: &["デザイン", "Figma"],
            skills: &["Figma"],
            location: "大阪府大阪市",
            salary: "時給 1,300円〜",
            work_style: WorkStyle::Remote,
            engagement: EngagementLength::LongTerm,
            posted_on: date(2025, 4, 12),
        },
        Posting {
            id: "job-007",
            organization_id: "org-fincore",
            title: "Rustで作る決済基盤の開発",
            description: "高い信頼性が求められる決済システムのサーバー開発に携わります。",
            tags: &["Rust", "バックエンド", "エンジニア"],
            skills: &["Rust", "gRPC"],
            location: "東京都港区",
            salary: "時給 2,200円〜",
            work_style: WorkStyle::Hybrid,
            engagement: EngagementLength::LongTerm,
            posted_on: date(2025, 4, 15),
        },
        Posting {
            id: "job-008",
            organization_id: "org-fincore",
            title: "新規事業企画インターン",
            description: "市場調査と事業計画の立案を経営陣と一緒に進めます。",
            tags: &["企画", "ビジネス"],
            skills: &[],
            location: "東京都港区",
            salary: "月給 200,000円",
            work_style: WorkStyle::Onsite,
            engagement: EngagementLength::LongTerm,
            posted_on: date(2025, 4, 18),
        },
        Posting {
            id: "job-009",
            organization_id: "org-datawave",
            title: "カスタマーサクセス（英語活用）",
            description: "海外顧客のオンボーディング支援を担当します。英語を使う機会が多い仕事です。",
            tags: &["カスタマーサクセス", "英語"],
            skills: &["English"],
            location: "東京都千代田区",
            salary: "時給1500円",
            work_style: WorkStyle::Hybrid,
            engagement: EngagementLength::ShortTerm,
            posted_on: date(2025, 4, 20),
        },
    ]
    .into_iter()
    .map(Posting::record)
    .collect();

    let articles = vec![
        Article {
            id: ArticleId::new("art-001"),
            title: "長期インターンの始め方".to_string(),
            summary: "初めての長期インターン選びで押さえたいポイントを紹介します。".to_string(),
            body: "長期インターンでは業務内容と勤務条件の確認が大切です。".to_string(),
            tags: strings(&["長期インターン", "入門"]),
            published_on: date(2025, 3, 20),
        },
        Article {
            id: ArticleId::new("art-002"),
            title: "エンジニア志望の学生が準備すべきこと".to_string(),
            summary: "ポートフォリオ作りから面接対策までをまとめました。".to_string(),
            body: "小さくても動くものを作り、説明できるようにしておきましょう。".to_string(),
            tags: strings(&["エンジニア", "就活"]),
            published_on: date(2025, 3, 28),
        },
        Article {
            id: ArticleId::new("art-003"),
            title: "リモートインターンで成果を出すコツ".to_string(),
            summary: "報連相とタスク管理の工夫を先輩インターン生に聞きました。".to_string(),
            body: "こまめな進捗共有が信頼につながります。".to_string(),
            tags: strings(&["リモート"]),
            published_on: date(2025, 4, 2),
        },
    ];

    CatalogDocument {
        organizations,
        listings,
        articles,
    }
}
