//! Instructional wrapper prompt for course generation
//!
//! The provider is told to emit JSON only, matching the schema text below.
//! The schema is documentation for the model; parsed output is not validated
//! against it.

/// JSON schema description embedded in every generation prompt
pub const COURSE_SCHEMA: &str = r#"{
  "courseTitle": "string - The title of the course",
  "modules": [
    {
      "moduleTitle": "string - Title of the module",
      "description": "string - Description of what the module covers",
      "lessons": [
        {
          "lessonTitle": "string - Title of the lesson",
          "content": "string - Detailed content/description of the lesson",
          "duration": "string - Estimated duration (e.g., '30 minutes')"
        }
      ],
      "quizzes": [
        {
          "question": "string - Quiz question",
          "options": ["string - Option A", "string - Option B", "string - Option C", "string - Option D"],
          "correctAnswer": "string - The correct option (e.g., 'A', 'B', 'C', or 'D')",
          "explanation": "string - Explanation of why this is the correct answer"
        }
      ]
    }
  ]
}"#;

/// Wrap a user request in the fixed course-designer instruction prompt
pub fn build_prompt(user_prompt: &str) -> String {
    format!(
        "You are an expert course designer. Based on the following user request, \
create a comprehensive course outline.\n\n\
User Request: {user_prompt}\n\n\
Please generate a structured course outline that follows this exact JSON schema:\n\
{COURSE_SCHEMA}\n\n\
Important:\n\
1. Return ONLY valid JSON that matches the schema exactly\n\
2. Do not include any markdown formatting or additional text\n\
3. Ensure the course is practical, engaging, and well-structured\n\
4. Include 3-5 modules with 2-4 lessons each\n\
5. Include 1-2 quiz questions per module\n\
6. Make the content realistic and actionable\n\n\
Generate the course now:"
    )
}
