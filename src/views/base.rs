use html_escape::{encode_double_quoted_attribute, encode_text};
use std::collections::BTreeMap;

pub const ICONS: &str = "img/icons.svg";

/// Containers of the page that views render into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    SearchResults,
    SearchPages,
    Recipe,
    Shopping,
    LikesList,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::SearchResults,
        Region::SearchPages,
        Region::Recipe,
        Region::Shopping,
        Region::LikesList,
    ];

    fn tag(&self) -> &'static str {
        match self {
            Region::SearchResults | Region::Shopping | Region::LikesList => "ul",
            Region::SearchPages | Region::Recipe => "div",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Region::SearchResults => "results__list",
            Region::SearchPages => "results__pages",
            Region::Recipe => "recipe",
            Region::Shopping => "shopping__list",
            Region::LikesList => "likes__list",
        }
    }
}

/// Where new markup goes relative to what a region already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    AfterBegin,
    BeforeEnd,
}

/// A rendered piece of markup. `key` identifies it for later removal or patching.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub key: Option<String>,
    pub html: String,
}

#[derive(Debug, Default, Clone)]
struct Container {
    fragments: Vec<Fragment>,
    loader: bool,
}

/// In-memory document the views mutate
#[derive(Debug, Default)]
pub struct Page {
    containers: BTreeMap<Region, Container>,
    search_input: String,
    likes_menu_visible: bool,
    like_button_active: bool,
    alerts: Vec<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        region: Region,
        position: Position,
        key: Option<String>,
        html: String,
    ) {
        let fragments = &mut self.containers.entry(region).or_default().fragments;
        let fragment = Fragment { key, html };
        match position {
            Position::AfterBegin => fragments.insert(0, fragment),
            Position::BeforeEnd => fragments.push(fragment),
        }
    }

    /// Drop every fragment of the region, including a loader
    pub fn clear(&mut self, region: Region) {
        self.containers.remove(&region);
    }

    /// Remove the fragment rendered under `key`. Returns `false` if there was none.
    pub fn remove(&mut self, region: Region, key: &str) -> bool {
        let Some(container) = self.containers.get_mut(&region) else {
            return false;
        };
        let before = container.fragments.len();
        container
            .fragments
            .retain(|fragment| fragment.key.as_deref() != Some(key));
        container.fragments.len() != before
    }

    /// Swap the markup of the fragment rendered under `key`, keeping its position
    pub fn replace(&mut self, region: Region, key: &str, html: String) -> bool {
        match self
            .fragments_mut(region)
            .find(|fragment| fragment.key.as_deref() == Some(key))
        {
            Some(fragment) => {
                fragment.html = html;
                true
            }
            None => false,
        }
    }

    pub fn fragments(&self, region: Region) -> &[Fragment] {
        self.containers
            .get(&region)
            .map(|container| container.fragments.as_slice())
            .unwrap_or_default()
    }

    pub fn fragments_mut(&mut self, region: Region) -> impl Iterator<Item = &mut Fragment> {
        self.containers
            .get_mut(&region)
            .into_iter()
            .flat_map(|container| container.fragments.iter_mut())
    }

    pub fn fragment(&self, region: Region, key: &str) -> Option<&Fragment> {
        self.fragments(region)
            .iter()
            .find(|fragment| fragment.key.as_deref() == Some(key))
    }

    pub fn has_loader(&self, region: Region) -> bool {
        self.containers
            .get(&region)
            .map(|container| container.loader)
            .unwrap_or(false)
    }

    fn set_loader(&mut self, region: Region, loader: bool) {
        if loader {
            self.containers.entry(region).or_default().loader = true;
        } else if let Some(container) = self.containers.get_mut(&region) {
            container.loader = false;
        }
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn set_search_input(&mut self, value: impl Into<String>) {
        self.search_input = value.into();
    }

    pub fn likes_menu_visible(&self) -> bool {
        self.likes_menu_visible
    }

    pub(crate) fn set_likes_menu_visible(&mut self, visible: bool) {
        self.likes_menu_visible = visible;
    }

    pub fn like_button_active(&self) -> bool {
        self.like_button_active
    }

    pub(crate) fn set_like_button_active(&mut self, active: bool) {
        self.like_button_active = active;
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Hand pending alerts to the caller, leaving none behind
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Serialize the page as a standalone HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::from(concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n",
            "<title>forkify // Search over 1,000,000 recipes</title>\n</head>\n<body>\n",
        ));

        html.push_str(&format!(
            "<form class=\"search\"><input type=\"text\" class=\"search__field\" value=\"{}\"></form>\n",
            encode_double_quoted_attribute(&self.search_input)
        ));
        html.push_str(&format!(
            "<div class=\"likes__field\" style=\"visibility: {}\"></div>\n",
            if self.likes_menu_visible { "visible" } else { "hidden" }
        ));

        for region in Region::ALL {
            html.push_str(&self.region_html(region));
        }

        for alert in &self.alerts {
            html.push_str(&format!(
                "<div class=\"alert\" role=\"alert\">{}</div>\n",
                encode_text(alert)
            ));
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn region_html(&self, region: Region) -> String {
        let mut html = format!("<{} class=\"{}\">\n", region.tag(), region.class_name());
        if self.has_loader(region) {
            html.push_str(&loader_markup());
        }
        for fragment in self.fragments(region) {
            html.push_str(&fragment.html);
            html.push('\n');
        }
        html.push_str(&format!("</{}>\n", region.tag()));
        html
    }
}

fn loader_markup() -> String {
    format!(
        "<div class=\"loader\"><svg><use href=\"{}#icon-cw\"></use></svg></div>\n",
        ICONS
    )
}

pub fn render_loader(page: &mut Page, region: Region) {
    page.set_loader(region, true);
}

pub fn clear_loader(page: &mut Page, region: Region) {
    page.set_loader(region, false);
}

/// Queue a message for the user
pub fn alert(page: &mut Page, message: impl Into<String>) {
    page.alerts.push(message.into());
}
