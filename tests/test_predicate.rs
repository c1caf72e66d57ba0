use recipe_browser::filter::{CompositePredicate, FilterExpression, FilterField};
use recipe_browser::recipe::{RecipeId, RecipeRecord};
use std::collections::BTreeMap;

fn recipe(id: u64, title: &str) -> RecipeRecord {
    RecipeRecord::new(RecipeId(id), title)
}

fn with_calories(mut record: RecipeRecord, amount: &str) -> RecipeRecord {
    record.nutrients = Some(BTreeMap::from([(
        "calories".to_string(),
        amount.to_string(),
    )]));
    record
}

fn compile(filters: &[(FilterField, &str)]) -> CompositePredicate {
    let expressions = filters
        .iter()
        .filter_map(|(field, raw)| FilterExpression::parse(*field, raw).expect("valid filter"));
    CompositePredicate::compile(expressions).expect("distinct fields")
}

#[test]
fn test_two_range_filters_must_both_hold() {
    let predicate = compile(&[(FilterField::Rating, ">=4"), (FilterField::TotalTime, "<=30")]);

    let mut slow = recipe(1, "Slow Roast");
    slow.rating = Some(4.5);
    slow.total_time = Some(45.0);
    assert!(!predicate.matches(&slow));

    let mut quick = recipe(2, "Quick Salad");
    quick.rating = Some(4.5);
    quick.total_time = Some(15.0);
    assert!(predicate.matches(&quick));
}

#[test]
fn test_equality_is_exact() {
    let predicate = compile(&[(FilterField::Rating, "4.5")]);

    let mut exact = recipe(1, "a");
    exact.rating = Some(4.5);
    let mut close = recipe(2, "b");
    close.rating = Some(4.50001);

    assert!(predicate.matches(&exact));
    assert!(!predicate.matches(&close));
}

#[test]
fn test_missing_numeric_value_never_matches_a_range() {
    let predicate = compile(&[(FilterField::TotalTime, "<=30")]);
    assert!(!predicate.matches(&recipe(1, "No timing")));
}

#[test]
fn test_title_is_case_insensitive_substring() {
    let predicate = compile(&[(FilterField::Title, "pOtAtO")]);
    assert!(predicate.matches(&recipe(1, "Sweet Potato Pie")));
    assert!(!predicate.matches(&recipe(2, "Apple Pie")));
}

#[test]
fn test_title_needle_is_literal_text() {
    let predicate = compile(&[(FilterField::Title, "(easy)")]);
    assert!(predicate.matches(&recipe(1, "Pancakes (Easy)")));
    assert!(!predicate.matches(&recipe(2, "Pancakes easy")));
}

#[test]
fn test_cuisine_is_case_sensitive_equality() {
    let predicate = compile(&[(FilterField::Cuisine, "Southern Recipes")]);

    let mut exact = recipe(1, "Grits");
    exact.cuisine = Some("Southern Recipes".to_string());
    let mut lower = recipe(2, "Grits");
    lower.cuisine = Some("southern recipes".to_string());
    let mut longer = recipe(3, "Grits");
    longer.cuisine = Some("Southern Recipes Collection".to_string());

    assert!(predicate.matches(&exact));
    assert!(!predicate.matches(&lower));
    assert!(!predicate.matches(&longer));
    assert!(!predicate.matches(&recipe(4, "No cuisine")));
}

#[test]
fn test_calories_range_uses_the_embedded_number() {
    let under = compile(&[(FilterField::Calories, "<500")]);
    let at_least = compile(&[(FilterField::Calories, ">=420")]);
    let exactly = compile(&[(FilterField::Calories, "420")]);

    let light = with_calories(recipe(1, "Light"), "420 kcal");
    let heavy = with_calories(recipe(2, "Heavy"), "1200 kcal");
    // A textual "\b420\b" match would wrongly accept this one for "=420"
    let contains_420 = with_calories(recipe(3, "Tricky"), "1420 kcal, 420 from fat");

    assert!(under.matches(&light));
    assert!(!under.matches(&heavy));

    assert!(at_least.matches(&light));
    assert!(at_least.matches(&heavy));

    assert!(exactly.matches(&light));
    assert!(!exactly.matches(&heavy));
    assert!(!exactly.matches(&contains_420));
}

#[test]
fn test_calories_filter_excludes_records_without_calories() {
    let predicate = compile(&[(FilterField::Calories, ">=0")]);

    let mut no_calories_key = recipe(1, "Water");
    no_calories_key.nutrients = Some(BTreeMap::from([(
        "sodiumContent".to_string(),
        "5 mg".to_string(),
    )]));
    let no_nutrients = recipe(2, "Ice");
    let unparseable = with_calories(recipe(3, "Mystery"), "unknown");

    assert!(!predicate.matches(&no_calories_key));
    assert!(!predicate.matches(&no_nutrients));
    assert!(!predicate.matches(&unparseable));

    let universal = CompositePredicate::universal();
    assert!(universal.matches(&no_calories_key));
    assert!(universal.matches(&no_nutrients));
}

#[test]
fn test_all_filters_combined() {
    let predicate = compile(&[
        (FilterField::Title, "chili"),
        (FilterField::Cuisine, "Tex-Mex"),
        (FilterField::Calories, "<=600"),
        (FilterField::TotalTime, "<60"),
        (FilterField::Rating, ">4"),
    ]);
    assert_eq!(predicate.len(), 5);

    let mut chili = with_calories(recipe(1, "Weeknight Chili"), "550 kcal");
    chili.cuisine = Some("Tex-Mex".to_string());
    chili.total_time = Some(45.0);
    chili.rating = Some(4.6);
    assert!(predicate.matches(&chili));

    let mut unrated = chili.clone();
    unrated.rating = None;
    assert!(!predicate.matches(&unrated));
}
