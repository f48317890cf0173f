use crate::domain::{
    diet_chart::{
        entities::{DAYS_PER_WEEK, DayNumber},
        schema::{sample_chart, sample_day},
    },
    profile::entities::UserProfile,
};

/// Comma-joined list, or `placeholder` when empty.
fn join_or(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.join(", ")
    }
}

fn or_unspecified(value: &str) -> &str {
    if value.is_empty() { "Not specified" } else { value }
}

struct PromptFields {
    health_conditions: String,
    allergies: String,
    food_preferences: String,
    disliked_foods: String,
    health_goals: String,
    avoid: String,
    medications: String,
}

impl PromptFields {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            health_conditions: join_or(&profile.health_conditions, "None"),
            allergies: join_or(&profile.allergies, "None"),
            food_preferences: join_or(&profile.food_preferences, "Flexible"),
            disliked_foods: join_or(&profile.disliked_foods, "None"),
            health_goals: join_or(&profile.health_goals, "General wellness"),
            avoid: join_or(&profile.avoid_list(), "None"),
            medications: if profile.medications.is_empty() {
                "None".to_string()
            } else {
                profile.medications.clone()
            },
        }
    }
}

/// Constraints shared by the weekly and single-day requests.
fn shared_requirements(profile: &UserProfile, fields: &PromptFields) -> String {
    format!(
        "1. All meals MUST be {diet_type} compatible - no exceptions\n\
         2. STRICTLY AVOID these ingredients: {avoid}\n\
         3. Focus on {dosha}-balancing foods, spices, and cooking methods\n\
         4. Address health conditions: {conditions}\n\
         5. Support primary goals: {goals}\n\
         6. Item names must be plain food names without quantities or measurements; put every quantity in the description\n\
         7. Give specific portion sizes in each description, for example \"1 cup rice\" or \"2 chapatis\"\n\
         8. Use realistic calorie counts based on the actual portion sizes\n\
         9. Adjust total daily calories for the weight goal: {weight_goal}\n",
        diet_type = profile.diet_type,
        avoid = fields.avoid,
        dosha = profile.dosha,
        conditions = fields.health_conditions,
        goals = fields.health_goals,
        weight_goal = or_unspecified(&profile.weight_goal),
    )
}

/// Render the full 7-day generation request for `profile`.
pub fn build_weekly_prompt(profile: &UserProfile) -> String {
    let fields = PromptFields::from_profile(profile);
    let example = sample_chart(profile.dosha);

    format!(
        "You are an expert Ayurvedic nutritionist and dietitian with deep knowledge of traditional Indian medicine \
and modern nutrition science. Create a comprehensive, personalized {days}-day diet chart based on the following client profile:

**PERSONAL INFORMATION:**
- Name: {name}
- Age: {age} years
- Gender: {gender}
- Current Weight: {weight} kg
- Height: {height} cm
- Activity Level: {activity}

**HEALTH PROFILE:**
- Health Conditions: {conditions}
- Food Allergies: {allergies}
- Current Medications: {medications}

**AYURVEDIC CONSTITUTION:**
- Dominant Dosha: {dosha}

**DIETARY PREFERENCES:**
- Diet Type: {diet_type}
- Food Preferences: {preferences}
- Foods to Avoid: {disliked}
- Meal Timing Preference: {meal_timing}
- Available Cooking Time: {cooking_time}
- Budget Range: {budget}

**HEALTH & WELLNESS GOALS:**
- Primary Goals: {goals}
- Weight Goal: {weight_goal}
- Timeframe: {timeframe}

**OUTPUT FORMAT:**
Return a JSON object with exactly this structure. The example shows one day; the real answer must contain {days} entries in \"weeklyPlan\", days 1 to {days}, Monday to Sunday:

{example:#}

**CRITICAL REQUIREMENTS:**
{shared}\
10. \"weeklyPlan\" must contain exactly {days} distinct days
11. Ensure variety across all {days} days - no repeated meals
12. Include authentic Indian cuisine options appropriate for a {budget} budget
13. All meals must be practical to prepare within {cooking_time} cooking time
14. Return ONLY the JSON object - no markdown, no code fences, no explanations before or after it

Generate the complete {days}-day personalized plan now as pure JSON.
",
        days = DAYS_PER_WEEK,
        name = profile.name,
        age = or_unspecified(&profile.age),
        gender = or_unspecified(&profile.gender),
        weight = or_unspecified(&profile.weight),
        height = or_unspecified(&profile.height),
        activity = or_unspecified(&profile.activity_level),
        conditions = fields.health_conditions,
        allergies = fields.allergies,
        medications = fields.medications,
        dosha = profile.dosha,
        diet_type = profile.diet_type,
        preferences = fields.food_preferences,
        disliked = fields.disliked_foods,
        meal_timing = or_unspecified(&profile.meal_timing),
        cooking_time = or_unspecified(&profile.cooking_time),
        budget = or_unspecified(&profile.budget),
        goals = fields.health_goals,
        weight_goal = or_unspecified(&profile.weight_goal),
        timeframe = or_unspecified(&profile.timeframe),
        example = example,
        shared = shared_requirements(profile, &fields),
    )
}

/// Render the request that regenerates one day of an existing plan.
pub fn build_single_day_prompt(profile: &UserProfile, day: DayNumber) -> String {
    let fields = PromptFields::from_profile(profile);
    let example = sample_day(day.get(), day.day_name(), profile.dosha);

    format!(
        "You are an expert Ayurvedic nutritionist. Generate a single day meal plan for day {day} ({day_name}) \
for a {dosha} dosha individual named {name}.

- Diet Type: {diet_type}
- Food Preferences: {preferences}
- Avoid: {avoid}
- Goals: {goals}

Return a JSON object for just this one day with exactly this structure, using the same meal slots \
(earlyMorning, breakfast, midMorning, lunch, eveningSnack, dinner, beforeBed):

{example:#}

**CRITICAL REQUIREMENTS:**
{shared}\
10. Set \"day\" to {day} and \"dayName\" to \"{day_name}\"
11. Return ONLY the JSON object for this day - no weeklyPlan wrapper, no markdown, no code fences, no explanations
",
        day = day.get(),
        day_name = day.day_name(),
        dosha = profile.dosha,
        name = profile.name,
        diet_type = profile.diet_type,
        preferences = fields.food_preferences,
        avoid = fields.avoid,
        goals = fields.health_goals,
        example = example,
        shared = shared_requirements(profile, &fields),
    )
}
