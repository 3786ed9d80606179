//! Learning recommendations for a missing skill: courses, project ideas and a three-month roadmap.

use serde::{Deserialize, Serialize};

use crate::matching::scoring::normalize_skill_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSuggestion {
    pub name: String,
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub month1: String,
    pub month2: String,
    pub month3: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub courses: Vec<CourseSuggestion>,
    pub projects: Vec<String>,
    pub roadmap: Roadmap,
}

struct CuratedCourse {
    name: &'static str,
    platform: &'static str,
    url: &'static str,
}

const fn course(name: &'static str, platform: &'static str, url: &'static str) -> CuratedCourse {
    CuratedCourse {
        name,
        platform,
        url,
    }
}

static COURSE_TABLE: &[(&str, &[CuratedCourse])] = &[
    (
        "python",
        &[
            course("Python for Everybody", "Coursera", "https://www.coursera.org/specializations/python"),
            course("Complete Python Bootcamp", "Udemy", "https://www.udemy.com/course/complete-python-bootcamp/"),
            course("Python Programming", "freeCodeCamp", "https://www.freecodecamp.org/learn/python-for-beginners/"),
        ],
    ),
    (
        "javascript",
        &[
            course("The Complete JavaScript Course", "Udemy", "https://www.udemy.com/course/the-complete-javascript-course/"),
            course("JavaScript Basics", "Coding Train", "https://thecodingtrain.com/"),
            course("JavaScript Full Stack", "freeCodeCamp", "https://www.freecodecamp.org/learn/javascript/"),
        ],
    ),
    (
        "typescript",
        &[
            course(
                "TypeScript: The Complete Developer's Guide",
                "Udemy",
                "https://www.udemy.com/course/typescript-the-complete-developers-guide/",
            ),
            course(
                "TypeScript for JavaScript Programmers",
                "TypeScript",
                "https://www.typescriptlang.org/docs/handbook/typescript-in-5-minutes.html",
            ),
        ],
    ),
    (
        "machine learning",
        &[
            course("Machine Learning by Andrew Ng", "Coursera", "https://www.coursera.org/learn/machine-learning"),
            course(
                "Machine Learning Specialization",
                "Coursera",
                "https://www.coursera.org/specializations/machine-learning-introduction",
            ),
            course("ML with Python", "freeCodeCamp", "https://www.freecodecamp.org/learn/machine-learning-with-python/"),
        ],
    ),
    (
        "deep learning",
        &[
            course("Deep Learning Specialization", "Coursera", "https://www.coursera.org/specializations/deep-learning"),
            course("Fast.ai - Practical Deep Learning", "Fast.ai", "https://www.fast.ai/"),
        ],
    ),
    (
        "sql",
        &[
            course("SQL for Data Science", "Coursera", "https://www.coursera.org/learn/sql-for-data-science"),
            course("The Complete SQL Bootcamp", "Udemy", "https://www.udemy.com/course/the-complete-sql-bootcamp/"),
            course("SQL Basics", "Khan Academy", "https://www.khanacademy.org/computing/computer-programming/sql"),
        ],
    ),
    (
        "react",
        &[
            course("React - The Complete Guide", "Udemy", "https://www.udemy.com/course/react-the-complete-guide/"),
            course("Full Stack Open", "University of Helsinki", "https://fullstackopen.com/en/"),
            course("React Fundamentals", "Egghead", "https://egghead.io/courses/react-fundamentals"),
        ],
    ),
    (
        "docker",
        &[
            course("Docker Mastery", "Udemy", "https://www.udemy.com/course/docker-mastery/"),
            course("Docker for Beginners", "KodeKloud", "https://kodekloud.com/courses/docker-for-beginners/"),
            course("Docker Handbook", "freeCodeCamp", "https://www.freecodecamp.org/news/docker-handbook/"),
        ],
    ),
    (
        "kubernetes",
        &[
            course("Kubernetes for Beginners", "KodeKloud", "https://kodekloud.com/courses/kubernetes-for-beginners/"),
            course(
                "Kubernetes CKAD Exam",
                "Linux Academy",
                "https://www.linuxacademy.com/courses/kubernetes-essentials",
            ),
        ],
    ),
    (
        "aws",
        &[
            course(
                "AWS Certified Solutions Architect",
                "A Cloud Guru",
                "https://acloudguru.com/course/aws-certified-solutions-architect-associate",
            ),
            course("AWS Fundamentals", "Coursera", "https://www.coursera.org/learn/aws-fundamentals"),
        ],
    ),
    (
        "git",
        &[
            course("Git and GitHub", "Udemy", "https://www.udemy.com/course/git-and-github-bootcamp/"),
            course("Git Basics", "Atlassian", "https://www.atlassian.com/git/tutorials/what-is-git"),
        ],
    ),
];

static PROJECT_TABLE: &[(&str, &[&str])] = &[
    (
        "python",
        &[
            "Build a CLI task manager with file persistence",
            "Create a web scraper with BeautifulSoup",
            "Develop a REST API with Flask or Django",
            "Build a data analysis project with Pandas",
        ],
    ),
    (
        "javascript",
        &[
            "Build a weather app using Open Weather API",
            "Create an interactive quiz game",
            "Develop a calculator or todo app",
            "Build a JavaScript library or utility",
        ],
    ),
    (
        "typescript",
        &[
            "Convert a JavaScript project to TypeScript",
            "Build a type-safe Node.js REST API",
            "Create a React component library in TypeScript",
        ],
    ),
    (
        "machine learning",
        &[
            "Build a sentiment analysis model on reviews",
            "Create a recommendation system for movies/products",
            "Develop a chatbot using NLP",
            "Build a predictive model on public datasets",
        ],
    ),
    (
        "sql",
        &[
            "Design a library management database schema",
            "Build analytics queries for e-commerce data",
            "Create a data warehouse schema",
            "Develop a reporting dashboard with SQL",
        ],
    ),
    (
        "react",
        &[
            "Build a task management app with state management",
            "Create a real-time chat application",
            "Develop a portfolio website",
            "Build a weather or movie search app",
        ],
    ),
    (
        "docker",
        &[
            "Containerize a full-stack application",
            "Set up a multi-container app with Docker Compose",
            "Create a deployment pipeline with Docker",
        ],
    ),
    (
        "git",
        &[
            "Contribute to an open-source project",
            "Set up a CI/CD pipeline with GitHub Actions",
            "Manage a team project with Git workflows",
        ],
    ),
];

fn lookup<'a, T: ?Sized>(table: &'a [(&str, &'a T)], key: &str) -> Option<&'a T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Builds recommendations for one missing skill. Curated entries are keyed by the
/// normalized name; anything else gets generic search links and project prompts
/// that use the skill name as given.
pub fn generate_recommendations(missing_skill: &str) -> Recommendation {
    let normalized = normalize_skill_name(missing_skill);

    let courses = match lookup(COURSE_TABLE, &normalized) {
        Some(curated) => curated
            .iter()
            .map(|c| CourseSuggestion {
                name: c.name.to_string(),
                platform: c.platform.to_string(),
                url: c.url.to_string(),
            })
            .collect(),
        None => fallback_courses(missing_skill),
    };

    let projects = match lookup(PROJECT_TABLE, &normalized) {
        Some(curated) => curated.iter().map(|p| p.to_string()).collect(),
        None => vec![
            format!("Build a portfolio project using {missing_skill}"),
            format!("Contribute to an open-source {missing_skill} project"),
        ],
    };

    Recommendation {
        courses,
        projects,
        roadmap: build_roadmap(missing_skill),
    }
}

/// Percent-encodes like a browser's `encodeURIComponent`: `! ' ( ) *` stay literal.
fn encode_query_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

fn fallback_courses(skill: &str) -> Vec<CourseSuggestion> {
    let encoded = encode_query_component(skill);
    vec![
        CourseSuggestion {
            name: format!("Learn {skill}"),
            platform: "Coursera".to_string(),
            url: format!("https://www.coursera.org/search?query={encoded}"),
        },
        CourseSuggestion {
            name: format!("{skill} Tutorial"),
            platform: "YouTube".to_string(),
            url: format!("https://www.youtube.com/results?search_query={encoded}+tutorial"),
        },
    ]
}

/// Fundamentals → projects → real-world application. Every skill gets one.
pub fn build_roadmap(skill: &str) -> Roadmap {
    Roadmap {
        month1: format!("Learn fundamentals of {skill}"),
        month2: format!("Build projects using {skill}"),
        month3: format!("Apply {skill} in real-world scenarios and contribute to open-source"),
    }
}
