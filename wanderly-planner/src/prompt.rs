//! Plan-generation prompt construction.

use wanderly_plans::WeatherSnapshot;

/// Render the plan-generation prompt for the given trip parameters.
///
/// The prompt demands pure JSON in the exact structure
/// [`GeneratedPlan`](wanderly_providers::GeneratedPlan) deserializes, and
/// folds the current conditions in so generated activities match the
/// weather.
pub fn build_prompt(
    city: &str,
    country: &str,
    days: u32,
    style: &str,
    budget: &str,
    preferences: &str,
    weather: &WeatherSnapshot,
) -> String {
    let preferences = if preferences.trim().is_empty() {
        "None"
    } else {
        preferences
    };

    format!(
        r#"You are an expert travel planner. Create a comprehensive {days}-day trip plan for {city}, {country}.

Trip Details:
- Duration: {days} days
- Travel Style: {style}
- Budget: {budget}
- Additional Preferences: {preferences}
- Current Weather: {description}, {temp}°C

IMPORTANT: Respond ONLY with valid JSON. No markdown, no code blocks, just pure JSON.

Provide this exact JSON structure:
{{
  "itinerary": [
    {{
      "day": "Day 1",
      "theme": "Theme for the day",
      "activities": [
        {{
          "time": "09:00 AM",
          "activity": "Activity name",
          "location": "Specific location",
          "description": "Brief description",
          "cost": "$XX"
        }}
      ]
    }}
  ],
  "hotels": [
    {{
      "name": "Hotel Name",
      "rating": "4.5",
      "pricePerNight": "$150",
      "amenities": ["WiFi", "Breakfast", "Pool"],
      "description": "Brief description",
      "bookingLink": "https://www.booking.com/searchresults.html?ss=Hotel+Name"
    }}
  ],
  "costs": {{
    "accommodation": "$XXX",
    "transportation": "$XXX",
    "food": "$XXX",
    "activities": "$XXX",
    "total": "$XXX"
  }},
  "packing": ["Item 1", "Item 2", "Item 3", "Item 4", "Item 5", "Item 6", "Item 7", "Item 8"],
  "tips": [
    "Tip 1 about the destination",
    "Tip 2 about local customs",
    "Tip 3 about transportation",
    "Tip 4 about safety",
    "Tip 5 about best times to visit attractions"
  ]
}}

Make sure:
1. Activities match the {style} travel style
2. Costs align with {budget} budget
3. Include specific restaurant recommendations for meals
4. Provide realistic timing (8 AM - 10 PM daily)
5. Include {days} complete days in the itinerary
6. Hotels should have real-sounding names appropriate for {city}
7. All costs should be in USD"#,
        description = weather.description,
        temp = weather.temp.round(),
    )
}
