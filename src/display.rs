use crate::config::DisplayRules;
use crate::paginate::{PageResult, Pagination};
use crate::recipe::RecipeRecord;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::{Value, json};
use std::fmt::Write as _;

pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn format_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

fn format_minutes(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v} min"))
}

fn format_pagination_line(pagination: &Pagination) -> String {
    let mut line = format!(
        "Page {} of {} ({} recipe{}, {} per page)",
        pagination.page,
        pagination.pages,
        pagination.total,
        if pagination.total == 1 { "" } else { "s" },
        pagination.limit
    );
    if pagination.has_prev {
        let _ = write!(line, "  prev: --page {}", pagination.page - 1);
    }
    if pagination.has_next {
        let _ = write!(line, "  next: --page {}", pagination.page + 1);
    }
    line
}

/// Format one page of recipes as a table followed by a navigation line
pub fn format_page_text(result: &PageResult<RecipeRecord>, rules: &DisplayRules) -> String {
    let mut out = String::new();

    if result.recipes.is_empty() {
        let _ = writeln!(out, "No recipes found.");
    } else {
        let mut table = create_styled_table(&[
            "ID", "Title", "Cuisine", "Rating", "Total", "Calories", "Serves",
        ]);
        for recipe in &result.recipes {
            table.add_row(vec![
                Cell::new(recipe.id),
                Cell::new(truncate_string(&recipe.title, rules.title_width)),
                Cell::new(recipe.cuisine.as_deref().unwrap_or("-")),
                Cell::new(format_number(recipe.rating)),
                Cell::new(format_minutes(recipe.total_time)),
                Cell::new(format_number(recipe.calories())),
                Cell::new(recipe.serves.as_deref().unwrap_or("-")),
            ]);
        }
        let _ = writeln!(out, "{table}");
    }

    let _ = writeln!(
        out,
        "{}",
        format_pagination_line(&result.pagination).bright_black()
    );
    out
}

/// Format one recipe in full
pub fn format_recipe_text(recipe: &RecipeRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.title.bold());
    let _ = writeln!(out, "{}", "-".repeat(80).bright_black());

    let mut summary = create_styled_table(&["Field", "Value"]);
    let rows = [
        ("ID", recipe.id.to_string()),
        ("Cuisine", recipe.cuisine.clone().unwrap_or_default()),
        ("Rating", format_number(recipe.rating)),
        ("Prep time", format_minutes(recipe.prep_time)),
        ("Cook time", format_minutes(recipe.cook_time)),
        ("Total time", format_minutes(recipe.total_time)),
        ("Serves", recipe.serves.clone().unwrap_or_default()),
        ("Region", region_label(recipe)),
        ("URL", recipe.url.clone().unwrap_or_default()),
    ];
    for (name, value) in rows {
        if !value.is_empty() {
            summary.add_row(vec![Cell::new(name), Cell::new(value)]);
        }
    }
    let _ = writeln!(out, "{summary}");

    if let Some(description) = &recipe.description {
        let _ = writeln!(out, "\n{}", description);
    }

    if !recipe.ingredients.is_empty() {
        let _ = writeln!(out, "\n{}", "INGREDIENTS".bold());
        for ingredient in &recipe.ingredients {
            let _ = writeln!(out, "  - {ingredient}");
        }
    }

    if !recipe.instructions.is_empty() {
        let _ = writeln!(out, "\n{}", "INSTRUCTIONS".bold());
        for (idx, step) in recipe.instructions.iter().enumerate() {
            let _ = writeln!(out, "  {:>2}. {step}", idx + 1);
        }
    }

    if let Some(nutrients) = &recipe.nutrients {
        let _ = writeln!(out, "\n{}", "NUTRIENTS".bold());
        let mut table = create_styled_table(&["Nutrient", "Amount"]);
        for (name, amount) in nutrients {
            table.add_row(vec![Cell::new(name), Cell::new(amount)]);
        }
        let _ = writeln!(out, "{table}");
    }

    out
}

fn region_label(recipe: &RecipeRecord) -> String {
    match (&recipe.country_state, &recipe.continent) {
        (Some(state), Some(continent)) => format!("{state}, {continent}"),
        (Some(only), None) | (None, Some(only)) => only.clone(),
        (None, None) => String::new(),
    }
}

pub fn format_cuisines_text(cuisines: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})",
        "CUISINES".bold(),
        cuisines.len()
    );
    for cuisine in cuisines {
        let _ = writeln!(out, "  {cuisine}");
    }
    out
}

/// JSON form of a recipe, including the derived `calories_numeric`
pub fn recipe_value(recipe: &RecipeRecord) -> Value {
    let mut value = serde_json::to_value(recipe).unwrap_or(Value::Null);
    if let (Value::Object(map), Some(calories)) = (&mut value, recipe.calories()) {
        map.insert("calories_numeric".to_string(), json!(calories));
    }
    value
}

fn success_json(data: Value) -> String {
    serde_json::to_string_pretty(&json!({ "success": true, "data": data }))
        .unwrap_or_else(|_| "{\"success\":false,\"message\":\"failed to serialize output\"}".into())
}

pub fn format_page_json(result: &PageResult<RecipeRecord>) -> String {
    let recipes: Vec<Value> = result.recipes.iter().map(recipe_value).collect();
    success_json(json!({
        "recipes": recipes,
        "pagination": result.pagination,
    }))
}

pub fn format_recipe_json(recipe: &RecipeRecord) -> String {
    success_json(recipe_value(recipe))
}

pub fn format_cuisines_json(cuisines: &[String]) -> String {
    success_json(json!(cuisines))
}

pub fn format_error_json(message: &str) -> String {
    serde_json::to_string_pretty(&json!({ "success": false, "message": message }))
        .unwrap_or_else(|_| "{\"success\":false}".into())
}
