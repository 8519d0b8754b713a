/// Stemmed (English snowball) terms typical of headers, footers, navigation,
/// legal notices and publishing metadata.
pub const BOILERPLATE_STEMS: &[&str] = &[
    // publishing & document structure
    "author",
    "appendix",
    "book",
    "chapter",
    "content",
    "edit",
    "ebook",
    "footer",
    "glossari",
    "gutenberg",
    "navig",
    "note",
    "page",
    "project",
    "publish",
    "text",
    // navigation & interaction
    "about",
    "locat",
    "profil",
    "share",
    "updat",
    // legal
    "copyright",
    "manag",
    "permiss",
    "polici",
    "privaci",
    "public",
    "purpos",
    "reproduc",
    "reserv",
    "right",
    "risk",
    "standard",
    "term",
    "use",
    // academic & technical references
    "citat",
    "depart",
    "edu",
    "feder",
    "foundat",
    "https",
    "isbn",
    "refer",
];
