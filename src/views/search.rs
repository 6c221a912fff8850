use super::base::{Page, Position, Region, ICONS};
use crate::models::RecipeSummary;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Titles longer than this are cut at a word boundary
pub const TITLE_LIMIT: usize = 17;

const ACTIVE_LINK: &str = "results__link results__link--active";
const LINK: &str = "results__link";

pub fn get_input(page: &Page) -> String {
    page.search_input().to_string()
}

pub fn clear_input(page: &mut Page) {
    page.set_search_input("");
}

pub fn clear_results(page: &mut Page) {
    page.clear(Region::SearchResults);
    page.clear(Region::SearchPages);
}

/// Shorten `title` to whole words fitting in `limit` characters, followed by " ...".
/// Once a word does not fit, no later word is taken either. A first word longer
/// than `limit` is cut to `limit` characters.
pub fn limit_title(title: &str, limit: usize) -> String {
    let title = title.trim();
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut used = 0;
    let mut words = Vec::new();
    for word in title.split(' ') {
        used += word.chars().count();
        if used > limit {
            break;
        }
        words.push(word);
    }
    if words.is_empty() {
        let head: String = title.chars().take(limit).collect();
        return format!("{} ...", head);
    }
    format!("{} ...", words.join(" "))
}

/// Which slice of the results is shown and which page buttons are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, 1-based and clamped to the available pages
    pub page: usize,
    /// Number of pages, `ceil(total / per_page)`
    pub pages: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub start: usize,
    pub end: usize,
}

pub fn pagination(total: usize, page: usize, per_page: usize) -> Pagination {
    let per_page = per_page.max(1);
    let pages = total.div_ceil(per_page);
    let page = page.clamp(1, pages.max(1));

    Pagination {
        page,
        pages,
        prev: (page > 1).then(|| page - 1),
        next: (page < pages).then(|| page + 1),
        start: ((page - 1) * per_page).min(total),
        end: (page * per_page).min(total),
    }
}

fn recipe_markup(recipe: &RecipeSummary) -> String {
    format!(
        r##"<li>
    <a class="{link}" href="#{id}">
        <figure class="results__fig">
            <img src="{img}" alt="{alt}">
        </figure>
        <div class="results__data">
            <h4 class="results__name">{title}</h4>
            <p class="results__author">{author}</p>
        </div>
    </a>
</li>"##,
        link = LINK,
        id = encode_double_quoted_attribute(&recipe.id),
        img = encode_double_quoted_attribute(&recipe.image_url),
        alt = encode_double_quoted_attribute(&recipe.title),
        title = encode_text(&limit_title(&recipe.title, TITLE_LIMIT)),
        author = encode_text(&recipe.author),
    )
}

fn button_markup(page: usize, direction: &str) -> String {
    let icon = if direction == "prev" { "left" } else { "right" };
    format!(
        r#"<button class="btn-inline results__btn--{direction}" data-goto="{page}">
    <span>Page {page}</span>
    <svg class="search__icon">
        <use href="{icons}#icon-triangle-{icon}"></use>
    </svg>
</button>"#,
        direction = direction,
        page = page,
        icons = ICONS,
        icon = icon,
    )
}

fn render_buttons(page: &mut Page, pagination: &Pagination) {
    let mut markup = String::new();
    if let Some(prev) = pagination.prev {
        markup.push_str(&button_markup(prev, "prev"));
    }
    if let Some(next) = pagination.next {
        markup.push_str(&button_markup(next, "next"));
    }
    if !markup.is_empty() {
        page.insert(Region::SearchPages, Position::AfterBegin, None, markup);
    }
}

/// Render one page of results plus its navigation buttons. Out-of-range page
/// numbers are clamped.
pub fn render_results(
    page: &mut Page,
    recipes: &[RecipeSummary],
    page_no: usize,
    per_page: usize,
) -> Pagination {
    let pagination = pagination(recipes.len(), page_no, per_page);

    for recipe in &recipes[pagination.start..pagination.end] {
        page.insert(
            Region::SearchResults,
            Position::BeforeEnd,
            Some(recipe.id.clone()),
            recipe_markup(recipe),
        );
    }
    render_buttons(page, &pagination);
    pagination
}

/// Mark the result linking to `id` as active, un-marking any other
pub fn highlight_selected(page: &mut Page, id: &str) {
    for fragment in page.fragments_mut(Region::SearchResults) {
        let selected = fragment.key.as_deref() == Some(id);
        let html = fragment.html.replace(ACTIVE_LINK, LINK);
        fragment.html = if selected {
            html.replacen(&format!("class=\"{}\"", LINK), &format!("class=\"{}\"", ACTIVE_LINK), 1)
        } else {
            html
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};
    use serde_json::Map;

    fn summaries(count: usize) -> Vec<RecipeSummary> {
        (0..count)
            .map(|i| RecipeSummary {
                id: format!("r{}", i),
                title: format!("Recipe {}", i),
                author: "Chef".to_string(),
                image_url: format!("http://example.com/{}.jpg", i),
                extra: Map::new(),
            })
            .collect()
    }

    fn select_count(html: &str, selector: &str) -> usize {
        let document = Html::parse_fragment(html);
        document.select(&Selector::parse(selector).unwrap()).count()
    }

    #[test]
    fn test_limit_title() {
        assert_eq!(limit_title("Pasta", 17), "Pasta");
        assert_eq!(
            limit_title("Pasta with tomato and spinach", 17),
            "Pasta with tomato ..."
        );
        assert_eq!(
            limit_title("Extraordinarily good pie", 17),
            "Extraordinarily ..."
        );
        assert_eq!(
            limit_title("Supercalifragilistic pie", 17),
            "Supercalifragilis ..."
        );
        assert_eq!(
            limit_title("Pie Supercalifragilistic tart", 17),
            "Pie ..."
        );
    }

    #[test]
    fn test_pagination_boundaries() {
        let first = pagination(25, 1, 10);
        assert_eq!(first.pages, 3);
        assert_eq!(first.prev, None);
        assert_eq!(first.next, Some(2));

        let middle = pagination(25, 2, 10);
        assert_eq!((middle.prev, middle.next), (Some(1), Some(3)));

        let last = pagination(25, 3, 10);
        assert_eq!(last.prev, Some(2));
        assert_eq!(last.next, None);
        assert_eq!((last.start, last.end), (20, 25));
    }

    #[test]
    fn test_pagination_clamps_page() {
        assert_eq!(pagination(25, 0, 10).page, 1);
        assert_eq!(pagination(25, 99, 10).page, 3);

        let empty = pagination(0, 3, 10);
        assert_eq!((empty.page, empty.pages), (1, 0));
        assert_eq!((empty.prev, empty.next), (None, None));
        assert_eq!((empty.start, empty.end), (0, 0));
    }

    #[test]
    fn test_every_page_is_reachable() {
        for total in 0..40usize {
            for per_page in 1..12usize {
                let pages = total.div_ceil(per_page);
                let mut seen = 0;
                let mut current = Some(1);
                while let Some(page) = current {
                    let p = pagination(total, page, per_page);
                    seen += p.end - p.start;
                    current = p.next;
                }
                assert_eq!(seen, total);
                assert_eq!(pagination(total, 1, per_page).pages, pages);
            }
        }
    }

    #[test]
    fn test_render_results_single_page_has_no_buttons() {
        let mut page = Page::new();
        let pagination = render_results(&mut page, &summaries(4), 1, 10);
        assert_eq!(pagination.pages, 1);
        assert_eq!(page.fragments(Region::SearchResults).len(), 4);
        assert!(page.fragments(Region::SearchPages).is_empty());
    }

    #[test]
    fn test_render_results_buttons() {
        let mut page = Page::new();
        render_results(&mut page, &summaries(25), 2, 10);
        let buttons = &page.fragments(Region::SearchPages)[0].html;
        assert_eq!(select_count(buttons, ".results__btn--prev[data-goto=\"1\"]"), 1);
        assert_eq!(select_count(buttons, ".results__btn--next[data-goto=\"3\"]"), 1);

        clear_results(&mut page);
        render_results(&mut page, &summaries(25), 3, 10);
        let buttons = &page.fragments(Region::SearchPages)[0].html;
        assert_eq!(select_count(buttons, ".results__btn--prev"), 1);
        assert_eq!(select_count(buttons, ".results__btn--next"), 0);
        assert_eq!(page.fragments(Region::SearchResults).len(), 5);
    }

    #[test]
    fn test_render_results_escapes_text() {
        let mut recipes = summaries(1);
        recipes[0].title = "<script>".to_string();
        let mut page = Page::new();
        render_results(&mut page, &recipes, 1, 10);

        let html = &page.fragments(Region::SearchResults)[0].html;
        assert!(!html.contains("<script>"));
        assert_eq!(select_count(html, "a.results__link[href=\"#r0\"]"), 1);
    }

    #[test]
    fn test_highlight_selected() {
        let mut page = Page::new();
        render_results(&mut page, &summaries(3), 1, 10);

        highlight_selected(&mut page, "r1");
        highlight_selected(&mut page, "r2");

        let all: String = page
            .fragments(Region::SearchResults)
            .iter()
            .map(|f| f.html.clone())
            .collect();
        assert_eq!(select_count(&all, ".results__link--active"), 1);
        assert_eq!(select_count(&all, ".results__link--active[href=\"#r2\"]"), 1);
    }
}
