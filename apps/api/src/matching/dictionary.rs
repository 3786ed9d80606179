//! Skill dictionary: canonical skill names and the aliases that denote them in free text.
//!
//! The table is plain data. Each alias is tagged as either a literal (matched verbatim,
//! regex metacharacters escaped) or a pattern (a regex fragment used as written).
//! The compiled form lives in a process-wide `Lazy` and is never mutated after load.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// One textual variant of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias {
    /// Matched verbatim: `c++`, `c#`, `node.js`.
    Literal(&'static str),
    /// Regex fragment: `\br\b`, `ci[/\-]?cd`.
    Pattern(&'static str),
}

impl Alias {
    /// Regex body for this alias, before boundary wrapping.
    pub fn regex_body(&self) -> String {
        match self {
            Alias::Literal(text) => regex::escape(text),
            Alias::Pattern(pattern) => (*pattern).to_string(),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Alias::Literal(text) | Alias::Pattern(text) => text,
        }
    }
}

/// A canonical skill and its ordered aliases.
#[derive(Debug, Clone, Copy)]
pub struct SkillEntry {
    pub name: &'static str,
    pub aliases: &'static [Alias],
}

use Alias::{Literal as L, Pattern as P};

const fn skill(name: &'static str, aliases: &'static [Alias]) -> SkillEntry {
    SkillEntry { name, aliases }
}

pub static SKILL_TABLE: &[SkillEntry] = &[
    // Programming languages
    skill("python", &[L("python"), L("py"), L("python3"), L("python 3"), L("python2"), L("python 2")]),
    skill(
        "javascript",
        &[L("javascript"), L("js"), L("es6"), L("es2015"), L("ecmascript"), L("es5"), L("ecma")],
    ),
    skill("typescript", &[L("typescript"), L("ts")]),
    skill("java", &[L("java"), L("jvm"), L("j2ee")]),
    skill("c++", &[L("c++"), L("cpp"), L("c plus plus")]),
    skill("c", &[P(r"\bc\b"), L("c programming"), L("c language")]),
    skill("c#", &[L("c#"), L("csharp"), L("c sharp"), L("dotnet")]),
    skill("r", &[P(r"\br\b"), L("r programming"), L("r language"), L("rstudio")]),
    skill("go", &[L("golang"), L("go"), L("go programming")]),
    skill("rust", &[L("rust")]),
    skill("ruby", &[L("ruby"), L("rails"), L("ruby on rails")]),
    skill("php", &[L("php")]),
    skill("swift", &[L("swift"), L("ios development")]),
    skill("kotlin", &[L("kotlin")]),
    skill("scala", &[L("scala")]),
    skill(
        "sql",
        &[
            L("sql"),
            L("mysql"),
            L("postgresql"),
            L("postgres"),
            L("sqlite"),
            L("tsql"),
            P(r"t[\-\s]sql"),
            P(r"pl[/\-]?sql"),
            L("oracle"),
        ],
    ),
    skill(
        "bash",
        &[L("bash"), L("shell"), L("sh"), L("zsh"), L("shell script"), L("scripting")],
    ),
    // Web frameworks and libraries
    skill("html", &[L("html"), L("html5")]),
    skill("css", &[L("css"), L("css3"), L("scss"), L("sass"), L("less"), L("tailwind")]),
    skill("react", &[L("react"), L("reactjs"), L("react.js")]),
    skill("node.js", &[L("node.js"), L("nodejs"), L("node")]),
    skill("next.js", &[L("next.js"), L("nextjs")]),
    skill("angular", &[L("angular"), L("angularjs")]),
    skill("vue", &[L("vue"), L("vuejs"), L("vue.js")]),
    skill("tailwind css", &[L("tailwind"), L("tailwindcss")]),
    skill("bootstrap", &[L("bootstrap")]),
    skill("express", &[L("express"), L("expressjs")]),
    skill("django", &[L("django")]),
    skill("flask", &[L("flask")]),
    skill("rest api", &[L("rest"), L("restful"), L("rest api"), L("api development")]),
    skill("graphql", &[L("graphql")]),
    skill("webpack", &[L("webpack")]),
    // Data and analytics
    skill("pandas", &[L("pandas")]),
    skill("numpy", &[L("numpy")]),
    skill("excel", &[L("excel"), L("spreadsheet"), L("xlsx"), L("vba")]),
    skill("tableau", &[L("tableau")]),
    skill("power bi", &[L("power bi"), L("powerbi")]),
    skill(
        "data visualization",
        &[L("data visualization"), L("data viz"), L("visualization"), L("plotly"), L("matplotlib")],
    ),
    skill(
        "data cleaning",
        &[L("data cleaning"), L("data wrangling"), L("data preprocessing"), L("etl")],
    ),
    skill("data modeling", &[L("data modeling"), L("data modelling")]),
    skill(
        "statistics",
        &[L("statistics"), L("statistical analysis"), L("stat"), L("r programming")],
    ),
    skill("business intelligence", &[L("business intelligence"), L("bi"), L("analytics")]),
    // AI / ML
    skill(
        "machine learning",
        &[L("machine learning"), L("ml"), L("ai"), L("artificial intelligence")],
    ),
    skill(
        "deep learning",
        &[
            L("deep learning"),
            L("dl"),
            L("neural network"),
            L("neural networks"),
            L("cnn"),
            L("rnn"),
            L("lstm"),
        ],
    ),
    skill("tensorflow", &[L("tensorflow"), L("tf")]),
    skill("pytorch", &[L("pytorch"), L("torch")]),
    skill("nlp", &[L("nlp"), L("natural language"), L("text mining"), L("text processing")]),
    skill(
        "computer vision",
        &[L("computer vision"), L("cv"), L("image recognition"), L("object detection")],
    ),
    skill("scikit", &[L("scikit"), L("sklearn")]),
    // DevOps and cloud
    skill("docker", &[L("docker"), L("dockerfile"), L("container"), L("containerization")]),
    skill("kubernetes", &[L("kubernetes"), L("k8s")]),
    skill(
        "aws",
        &[
            L("aws"),
            L("amazon web services"),
            L("ec2"),
            L("s3"),
            L("lambda"),
            L("rds"),
            L("dynamodb"),
        ],
    ),
    skill("azure", &[L("azure"), L("microsoft azure"), L("cosmosdb"), L("app service")]),
    skill("gcp", &[L("gcp"), L("google cloud"), L("bigquery")]),
    skill("terraform", &[L("terraform"), L("iac"), L("infrastructure as code")]),
    skill(
        "ci/cd",
        &[
            P(r"ci[/\-]?cd"),
            L("cicd"),
            L("continuous integration"),
            L("continuous deployment"),
            L("continuous delivery"),
            L("jenkins"),
            L("github actions"),
            L("gitlab ci"),
        ],
    ),
    skill(
        "git",
        &[L("git"), L("github"), L("gitlab"), L("version control"), L("bitbucket")],
    ),
    skill("linux", &[L("linux"), L("ubuntu"), L("centos"), L("redhat"), L("rhel")]),
    skill("windows", &[L("windows server"), L("powershell")]),
    // Databases
    skill("mongodb", &[L("mongodb"), L("mongo")]),
    skill("postgresql", &[L("postgresql"), L("postgres")]),
    skill("mysql", &[L("mysql")]),
    skill("redis", &[L("redis")]),
    skill("elasticsearch", &[L("elasticsearch"), L("elastic")]),
    skill("cassandra", &[L("cassandra")]),
    skill("dynamodb", &[L("dynamodb")]),
    skill("firebase", &[L("firebase")]),
    // Security and networking
    skill(
        "security",
        &[L("security"), L("cybersecurity"), L("information security"), L("infosec")],
    ),
    skill("firewalls", &[L("firewall"), L("firewalls")]),
    skill("siem", &[L("siem"), L("splunk")]),
    skill(
        "penetration testing",
        &[L("penetration testing"), L("pentesting"), L("ethical hacking")],
    ),
    skill("incident response", &[L("incident response"), L("ir")]),
    skill("cryptography", &[L("cryptography"), L("encryption"), L("ssl"), L("tls")]),
    skill("risk assessment", &[L("risk assessment"), L("risk management")]),
    skill(
        "compliance",
        &[L("compliance"), L("gdpr"), L("hipaa"), L("sox"), L("pci")],
    ),
    skill(
        "vulnerability assessment",
        &[L("vulnerability assessment"), L("vulnerability scanning")],
    ),
    skill(
        "networking",
        &[L("networking"), P(r"tcp[/\-]?ip"), L("dns"), L("dhcp"), L("vpn")],
    ),
    skill(
        "monitoring",
        &[L("monitoring"), L("prometheus"), L("grafana"), L("nagios")],
    ),
    skill("jenkins", &[L("jenkins")]),
    skill("ansible", &[L("ansible")]),
    // Soft skills and methodologies
    skill(
        "problem solving",
        &[L("problem solving"), P(r"problem[\-\s]solving"), L("analytical thinking")],
    ),
    skill(
        "communication",
        &[
            L("communication"),
            L("verbal communication"),
            L("written communication"),
            L("presentation"),
        ],
    ),
    skill("critical thinking", &[L("critical thinking")]),
    skill(
        "teamwork",
        &[L("teamwork"), L("team player"), L("collaboration"), L("collaborative")],
    ),
    skill(
        "leadership",
        &[L("leadership"), L("team lead"), L("management"), L("mentor")],
    ),
    skill("agile", &[L("agile"), L("scrum"), L("kanban"), L("sprint"), L("xp")]),
    skill(
        "project management",
        &[L("project management"), L("jira"), L("asana"), L("monday")],
    ),
    // Algorithms and concepts
    skill("data structures", &[L("data structure"), L("data structures")]),
    skill("algorithms", &[L("algorithm"), L("algorithms"), L("algorithm design")]),
    skill(
        "mathematics",
        &[
            L("mathematics"),
            L("math"),
            L("linear algebra"),
            L("calculus"),
            L("discrete math"),
        ],
    ),
];

/// Wraps an alias body so it only matches when flanked by start/end of text,
/// whitespace, a slash or a hyphen.
fn boundary_regex(body: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)(?:^|\s|[/\-]){body}(?:\s|[/\-]|$)"))
}

/// A skill with its aliases compiled, in table order.
#[derive(Debug)]
pub struct CompiledSkill {
    pub name: &'static str,
    matchers: Vec<Regex>,
}

impl CompiledSkill {
    /// True on the first alias that matches; remaining aliases are not evaluated.
    pub fn is_present_in(&self, lowered_text: &str) -> bool {
        self.matchers.iter().any(|re| re.is_match(lowered_text))
    }

    #[cfg(test)]
    pub fn alias_count(&self) -> usize {
        self.matchers.len()
    }
}

#[derive(Debug)]
pub struct SkillDictionary {
    skills: Vec<CompiledSkill>,
}

static DICTIONARY: Lazy<SkillDictionary> = Lazy::new(|| SkillDictionary::compile(SKILL_TABLE));

impl SkillDictionary {
    /// Compiles every alias in `table`. Aliases that fail to compile are logged and skipped.
    pub fn compile(table: &[SkillEntry]) -> Self {
        let skills = table
            .iter()
            .map(|entry| {
                let matchers = entry
                    .aliases
                    .iter()
                    .filter_map(|alias| match boundary_regex(&alias.regex_body()) {
                        Ok(re) => Some(re),
                        Err(e) => {
                            warn!(
                                "Skipping malformed alias '{}' for skill '{}': {e}",
                                alias.text(),
                                entry.name
                            );
                            None
                        }
                    })
                    .collect();
                CompiledSkill {
                    name: entry.name,
                    matchers,
                }
            })
            .collect();

        Self { skills }
    }

    /// The process-wide dictionary built from `SKILL_TABLE`.
    pub fn global() -> &'static SkillDictionary {
        &DICTIONARY
    }

    pub fn skills(&self) -> &[CompiledSkill] {
        &self.skills
    }

    /// Canonical names, sorted alphabetically.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.skills.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }
}
