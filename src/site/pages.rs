//! Fixed registry of site routes and blog posts.
//!
//! Each entry carries what the page hands to the generator (title, summary,
//! content type) plus the hero image used for social cards.

use crate::error::SeoError;
use crate::output::SeoMetaInput;

/// Content type of every blog post.
pub const BLOG_CONTENT_TYPE: &str = "blog post";

/// A static route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub path: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub content_type: Option<&'static str>,
    pub hero_image: Option<&'static str>,
}

impl PageEntry {
    pub fn to_input(&self) -> SeoMetaInput {
        let input = SeoMetaInput::new(self.title, self.summary);
        match self.content_type {
            Some(ct) => input.with_content_type(ct),
            None => input,
        }
    }

    /// File stem used for build output: `/` is `index`, otherwise the path
    /// without its leading slash.
    pub fn output_name(&self) -> String {
        match self.path.trim_start_matches('/') {
            "" => "index".to_string(),
            rest => rest.replace('/', "-"),
        }
    }

    pub fn is_home(&self) -> bool {
        self.path == "/"
    }
}

/// A blog post, served at `/blogs/<slug>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub author: &'static str,
    /// Publication date, `YYYY-MM-DD`.
    pub date: &'static str,
    pub image: &'static str,
}

impl BlogPost {
    pub fn path(&self) -> String {
        format!("/blogs/{}", self.slug)
    }

    pub fn to_input(&self) -> SeoMetaInput {
        SeoMetaInput::new(self.title, self.excerpt).with_content_type(BLOG_CONTENT_TYPE)
    }

    pub fn output_name(&self) -> String {
        format!("blogs-{}", self.slug)
    }
}

/// A page or blog post, as resolved from a path or slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePage<'a> {
    Static(&'a PageEntry),
    Post(&'a BlogPost),
}

impl SitePage<'_> {
    pub fn path(&self) -> String {
        match self {
            SitePage::Static(p) => p.path.to_string(),
            SitePage::Post(p) => p.path(),
        }
    }

    pub fn to_input(&self) -> SeoMetaInput {
        match self {
            SitePage::Static(p) => p.to_input(),
            SitePage::Post(p) => p.to_input(),
        }
    }

    pub fn image(&self) -> Option<&'static str> {
        match self {
            SitePage::Static(p) => p.hero_image,
            SitePage::Post(p) => Some(p.image),
        }
    }

    pub fn output_name(&self) -> String {
        match self {
            SitePage::Static(p) => p.output_name(),
            SitePage::Post(p) => p.output_name(),
        }
    }
}

static PAGES: &[PageEntry] = &[
    PageEntry {
        path: "/",
        title: "Giridih Explorer - Your Guide to Giridih District",
        summary: "Discover Giridih: explore Parasnath Hill, forests, wildlife, culture, history, local crafts, and plan your trip with a comprehensive tourism guide for Giridih District, Jharkhand, India.",
        content_type: Some("home page"),
        hero_image: None,
    },
    PageEntry {
        path: "/explore",
        title: "Explore Giridih - Attractions, Destinations, and Activities",
        summary: "Find featured destinations, nature spots, spiritual sites, and cultural experiences in Giridih. Plan your exploration with our detailed guide.",
        content_type: Some("directory page"),
        hero_image: None,
    },
    PageEntry {
        path: "/parasnath-hill",
        title: "Parasnath Hill (Shikharji) - Sacred Jain Pilgrimage & Trek in Giridih",
        summary: "Explore Parasnath Hill (Shikharji), Jharkhand's highest peak and a paramount Jain pilgrimage site. Learn about its spiritual significance, the trek, temples, Madhuban, conservation efforts, and plan your visit to this iconic destination in Giridih.",
        content_type: Some("destination page"),
        hero_image: Some("https://t3.ftcdn.net/jpg/06/44/90/42/240_F_644904289_NbXKTKISNlcpn6ttB2P3upo1IIPqpeKE.jpg"),
    },
    PageEntry {
        path: "/forests-wildlife",
        title: "Forests & Wildlife of Giridih - Biodiversity and Nature Sanctuaries",
        summary: "Discover the rich biodiversity, dense forests, various wildlife species, and key nature sanctuaries like Parasnath Wildlife Sanctuary in Giridih district. Information on flora, fauna, and conservation efforts.",
        content_type: Some("informational page"),
        hero_image: Some("https://cdn.pixabay.com/photo/2025/01/31/17/03/fallow-deer-9372866_1280.jpg"),
    },
    PageEntry {
        path: "/culture-festivals",
        title: "Culture & Festivals of Giridih",
        summary: "Discover local traditions, music, dance, and celebrations of Giridih, from the Sohrai harvest festival to tribal art and community fairs.",
        content_type: Some("informational page"),
        hero_image: Some("https://cdn.pixabay.com/photo/2021/01/08/17/02/old-man-5900410_1280.jpg"),
    },
    PageEntry {
        path: "/history-heritage",
        title: "History & Heritage of Giridih - Ancient Sites, Colonial Past, and Landmarks",
        summary: "Uncover the rich history and cultural heritage of Giridih district, from its ancient tribal roots and Jain significance to the British colonial era. Learn about key historical sites, monuments, and influential periods.",
        content_type: Some("informational page"),
        hero_image: Some("https://cdn.pixabay.com/photo/2020/03/17/11/29/temple-4939831_1280.jpg"),
    },
    PageEntry {
        path: "/local-economy-crafts",
        title: "Local Economy & Crafts - Industries, Agriculture, Artisans, and Markets",
        summary: "Explore Giridih's diverse economy: agriculture (paddy, maize, fishing), industries (coal, mica, Mongia Steel), traditional crafts (stone carving, handloom, Sohrai), local markets (KD Market), and sustainable forest products like Tendu leaves and honey.",
        content_type: Some("informational page"),
        hero_image: Some("https://images.pexels.com/photos/2892269/pexels-photo-2892269.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1"),
    },
    PageEntry {
        path: "/tourism-guide",
        title: "Giridih Tourism Guide - Plan Your Visit, Attractions, Stays, Food, and Tips",
        summary: "A comprehensive tourism guide for visiting Giridih district. Find essential information on top places to visit like Parasnath Hill and Usri Falls, things to do, accommodation options, local cuisine, and practical travel tips for a memorable trip.",
        content_type: Some("guide page"),
        hero_image: Some("https://cdn.pixabay.com/photo/2019/04/24/14/03/map-4152197_1280.jpg"),
    },
    PageEntry {
        path: "/people-lifestyle",
        title: "People & Lifestyle of Giridih",
        summary: "Understand the communities and daily life in Giridih: tribal and rural traditions, languages, livelihoods, food, and the rhythm of village and town life.",
        content_type: Some("informational page"),
        hero_image: Some("https://cdn.pixabay.com/photo/2017/08/29/12/07/adult-2693054_1280.jpg"),
    },
    PageEntry {
        path: "/gallery",
        title: "Gallery - Visual Glimpses of Giridih",
        summary: "Visual glimpses of Giridih: photographs of Parasnath Hill, waterfalls, forests, festivals, and everyday life across the district.",
        content_type: Some("gallery page"),
        hero_image: None,
    },
    PageEntry {
        path: "/blogs",
        title: "Blogs & Stories - Experiences and Tales from Giridih",
        summary: "Read experiences and tales from Giridih: treks to Parasnath Hill, village festivals, forgotten history, and life along the Usri River.",
        content_type: Some("blog listing page"),
        hero_image: None,
    },
    PageEntry {
        path: "/forums",
        title: "Giridih Community Forums - Discuss, Share Experiences, and Connect",
        summary: "Join the Giridih Explorer community forums to discuss travel tips, share your experiences, ask questions about attractions like Parasnath Hill, and connect with fellow travelers and locals. (Forum functionality coming soon).",
        content_type: Some("forum page"),
        hero_image: None,
    },
    PageEntry {
        path: "/contact",
        title: "Contact Giridih Explorer",
        summary: "Get in touch with the Giridih Explorer team with questions, suggestions, or corrections about travel and culture in Giridih district.",
        content_type: Some("contact page"),
        hero_image: None,
    },
    PageEntry {
        path: "/settings",
        title: "Settings",
        summary: "Customize your appearance settings for the Giridih Explorer website.",
        content_type: None,
        hero_image: None,
    },
];

static BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "parasnath-trek",
        title: "A Trekker's Tale: Conquering Parasnath Hill",
        excerpt: "Reliving the spiritual and physical journey to the summit of Shikharji, encountering breathtaking views and moments of reflection along the way.",
        author: "Adventurous Soul",
        date: "2024-07-15",
        image: "https://picsum.photos/seed/blog-parasnath/600/400",
    },
    BlogPost {
        slug: "sohrai-celebration",
        title: "The Vibrant Colors of Sohrai: A Village Celebration",
        excerpt: "Experience the joy and traditions of the Sohrai festival, where homes are adorned with art and cattle are celebrated in rural Giridih.",
        author: "Culture Explorer",
        date: "2024-06-28",
        image: "https://picsum.photos/seed/blog-sohrai/600/400",
    },
    BlogPost {
        slug: "giridih-history-whispers",
        title: "Whispers of the Past: Unearthing History in Giridih",
        excerpt: "A journey through time exploring the lesser-known historical sites and remnants of the British era that tell the story of Giridih's evolution.",
        author: "History Buff",
        date: "2024-05-10",
        image: "https://picsum.photos/seed/blog-history/600/400",
    },
    BlogPost {
        slug: "usri-river-life",
        title: "Life by the Usri: Encounters Along the Riverbanks",
        excerpt: "Discovering the serene beauty and daily life that unfolds along the banks of the Usri River, a lifeline for many communities in Giridih.",
        author: "Nature Lover",
        date: "2024-08-01",
        image: "https://picsum.photos/seed/blog-usri-river/600/400",
    },
];

/// Every static route, in sitemap order.
pub fn pages() -> &'static [PageEntry] {
    PAGES
}

pub fn blog_posts() -> &'static [BlogPost] {
    BLOG_POSTS
}

pub fn page_by_path(path: &str) -> Option<&'static PageEntry> {
    let path = normalize_path(path);
    PAGES.iter().find(|p| p.path == path)
}

pub fn blog_post_by_slug(slug: &str) -> Option<&'static BlogPost> {
    BLOG_POSTS.iter().find(|p| p.slug == slug)
}

/// Resolve a route path, a `/blogs/<slug>` path, or a bare blog slug.
///
/// # Errors
/// [`SeoError::UnknownPage`] when nothing matches.
pub fn resolve(key: &str) -> Result<SitePage<'static>, SeoError> {
    let path = normalize_path(key);
    if let Some(page) = page_by_path(&path) {
        return Ok(SitePage::Static(page));
    }
    let slug = path
        .strip_prefix("/blogs/")
        .unwrap_or_else(|| key.trim().trim_matches('/'));
    blog_post_by_slug(slug)
        .map(SitePage::Post)
        .ok_or_else(|| SeoError::UnknownPage(key.to_string()))
}

/// Every page and post in build order: static routes first, then posts.
pub fn all() -> Vec<SitePage<'static>> {
    PAGES
        .iter()
        .map(SitePage::Static)
        .chain(BLOG_POSTS.iter().map(SitePage::Post))
        .collect()
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_route() {
        assert_eq!(pages().len(), 14);
        assert_eq!(blog_posts().len(), 4);
        assert_eq!(all().len(), 18);
    }

    #[test]
    fn lookup_tolerates_missing_and_trailing_slashes() {
        assert_eq!(page_by_path("gallery").unwrap().path, "/gallery");
        assert_eq!(page_by_path("/gallery/").unwrap().path, "/gallery");
        assert_eq!(page_by_path("").unwrap().path, "/");
        assert!(page_by_path("/nowhere").is_none());
    }

    #[test]
    fn resolve_accepts_slugs_and_blog_paths() {
        assert!(matches!(resolve("usri-river-life"), Ok(SitePage::Post(p)) if p.date == "2024-08-01"));
        assert!(matches!(resolve("/blogs/parasnath-trek"), Ok(SitePage::Post(_))));
        assert!(matches!(resolve("/blogs"), Ok(SitePage::Static(_))));
        assert!(matches!(resolve("nope"), Err(SeoError::UnknownPage(_))));
    }

    #[test]
    fn blog_post_input_is_tagged() {
        let input = blog_post_by_slug("sohrai-celebration").unwrap().to_input();
        assert_eq!(input.content_type(), Some(BLOG_CONTENT_TYPE));
    }

    #[test]
    fn output_names_are_unique() {
        let mut names: Vec<String> = all().iter().map(SitePage::output_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 18);
        assert_eq!(pages()[0].output_name(), "index");
    }
}
