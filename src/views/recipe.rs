use super::base::{Page, Position, Region, ICONS};
use crate::models::{format_count, ParsedIngredient, Recipe};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Key of the fragment holding the recipe panel
pub const RECIPE_KEY: &str = "recipe";

pub fn clear_recipe(page: &mut Page) {
    page.clear(Region::Recipe);
}

fn ingredient_markup(ingredient: &ParsedIngredient) -> String {
    format!(
        r#"<li class="recipe__item">
    <svg class="recipe__icon"><use href="{icons}#icon-check"></use></svg>
    <div class="recipe__count">{count}</div>
    <div class="recipe__ingredient">
        <span class="recipe__unit">{unit}</span>
        {ingredient}
    </div>
</li>"#,
        icons = ICONS,
        count = format_count(ingredient.count),
        unit = encode_text(&ingredient.unit),
        ingredient = encode_text(&ingredient.ingredient),
    )
}

pub(crate) fn like_icon(is_liked: bool) -> &'static str {
    if is_liked {
        "icon-heart"
    } else {
        "icon-heart-outlined"
    }
}

fn recipe_markup(recipe: &Recipe, is_liked: bool) -> String {
    let ingredients: String = recipe.ingredients.iter().map(ingredient_markup).collect();
    let calories = recipe
        .calories
        .map(|calories| {
            format!(
                r#"
        <div class="recipe__info">
            <span class="recipe__info-data recipe__info-data--calories">{:.0}</span>
            <span class="recipe__info-text"> kcal</span>
        </div>"#,
                calories
            )
        })
        .unwrap_or_default();

    format!(
        r#"<figure class="recipe__fig">
    <img src="{img}" alt="{alt}" class="recipe__img">
    <h1 class="recipe__title"><span>{title}</span></h1>
</figure>
<div class="recipe__details">
    <div class="recipe__info">
        <svg class="recipe__info-icon"><use href="{icons}#icon-stopwatch"></use></svg>
        <span class="recipe__info-data recipe__info-data--minutes">{time}</span>
        <span class="recipe__info-text"> minutes</span>
    </div>
    <div class="recipe__info">
        <svg class="recipe__info-icon"><use href="{icons}#icon-man"></use></svg>
        <span class="recipe__info-data recipe__info-data--people">{servings}</span>
        <span class="recipe__info-text"> servings</span>
        <div class="recipe__info-buttons">
            <button class="btn-tiny btn-decrease"><svg><use href="{icons}#icon-circle-with-minus"></use></svg></button>
            <button class="btn-tiny btn-increase"><svg><use href="{icons}#icon-circle-with-plus"></use></svg></button>
        </div>
    </div>{calories}
    <button class="recipe__love">
        <svg class="header__likes"><use href="{icons}#{heart}"></use></svg>
    </button>
</div>
<div class="recipe__ingredients">
    <ul class="recipe__ingredient-list">
{ingredients}
    </ul>
    <button class="btn-small recipe__btn recipe__btn--add">
        <svg class="search__icon"><use href="{icons}#icon-shopping-cart"></use></svg>
        <span>Add to shopping list</span>
    </button>
</div>
<div class="recipe__directions">
    <h2 class="heading-2">How to cook it</h2>
    <p class="recipe__directions-text">
        This recipe was carefully designed and tested by
        <span class="recipe__by">{author}</span>. Please check out directions at their website.
    </p>
    <a class="btn-small recipe__btn" href="{url}" target="_blank">
        <span>Directions</span>
        <svg class="search__icon"><use href="{icons}#icon-triangle-right"></use></svg>
    </a>
</div>"#,
        icons = ICONS,
        img = encode_double_quoted_attribute(&recipe.img),
        alt = encode_double_quoted_attribute(&recipe.title),
        title = encode_text(&recipe.title),
        time = recipe.time,
        servings = recipe.servings,
        calories = calories,
        heart = like_icon(is_liked),
        ingredients = ingredients,
        author = encode_text(&recipe.author),
        url = encode_double_quoted_attribute(&recipe.url),
    )
}

pub fn render_recipe(page: &mut Page, recipe: &Recipe, is_liked: bool) {
    page.clear(Region::Recipe);
    page.insert(
        Region::Recipe,
        Position::AfterBegin,
        Some(RECIPE_KEY.to_string()),
        recipe_markup(recipe, is_liked),
    );
    page.set_like_button_active(is_liked);
}

/// Redraw servings and ingredient counts, keeping the like button as it is
pub fn update_servings_ingredients(page: &mut Page, recipe: &Recipe) {
    let is_liked = page.like_button_active();
    render_recipe(page, recipe, is_liked);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServingsDirection;
    use scraper::{Html, Selector};

    fn sample_recipe() -> Recipe {
        let mut recipe = Recipe::new("47746");
        recipe.title = "Best Pizza Dough Ever".to_string();
        recipe.author = "101 Cookbooks".to_string();
        recipe.url = "http://example.com/pizza".to_string();
        recipe.ingredients_raw = vec!["1 1/2 cups flour".to_string(), "salt".to_string()];
        recipe.parse_ingredients();
        recipe.calc_time();
        recipe.calc_servings();
        recipe
    }

    fn texts(page: &Page, selector: &str) -> Vec<String> {
        let html = &page.fragment(Region::Recipe, RECIPE_KEY).unwrap().html;
        let document = Html::parse_fragment(html);
        document
            .select(&Selector::parse(selector).unwrap())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[test]
    fn test_render_recipe() {
        let mut page = Page::new();
        render_recipe(&mut page, &sample_recipe(), false);

        assert_eq!(texts(&page, ".recipe__title"), vec!["Best Pizza Dough Ever"]);
        assert_eq!(texts(&page, ".recipe__info-data--minutes"), vec!["15"]);
        assert_eq!(texts(&page, ".recipe__info-data--people"), vec!["4"]);
        assert_eq!(texts(&page, ".recipe__count"), vec!["1 1/2", ""]);
        assert_eq!(texts(&page, ".recipe__unit"), vec!["cup", ""]);
        assert!(!page.like_button_active());
    }

    #[test]
    fn test_render_twice_replaces_panel() {
        let mut page = Page::new();
        render_recipe(&mut page, &sample_recipe(), true);
        render_recipe(&mut page, &sample_recipe(), true);

        assert_eq!(page.fragments(Region::Recipe).len(), 1);
        assert!(page.like_button_active());
    }

    #[test]
    fn test_update_servings_ingredients() {
        let mut page = Page::new();
        let mut recipe = sample_recipe();
        render_recipe(&mut page, &recipe, true);

        recipe.update_servings(ServingsDirection::Dec);
        update_servings_ingredients(&mut page, &recipe);

        assert_eq!(texts(&page, ".recipe__info-data--people"), vec!["3"]);
        assert_eq!(texts(&page, ".recipe__count")[0], "1 1/8");
        let html = &page.fragment(Region::Recipe, RECIPE_KEY).unwrap().html;
        assert!(html.contains("#icon-heart\""));
    }
}
