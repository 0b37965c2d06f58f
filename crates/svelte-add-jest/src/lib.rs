//! Svelte Jest adder - wires Jest, Testing Library and optional TypeScript
//! support into a Svelte project

use adder_core::{
    safe_extract, Adder, ConfigOption, Dependency, EmbeddedTemplate, Extract, Instruct, Preset,
    TemplateSource,
};
use colored::Colorize;
use serde_json::json;

/// Environment variable for overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "SVELTE_ADD_JEST_TEMPLATE_DIR";

/// Where example test files are placed
pub const ROUTES_DIR: &str = "src/routes/";

const CONFIGURATION: &[ConfigOption] = &[
    ConfigOption::question("jest-dom", "Enable Jest DOM support?", true),
    ConfigOption::question("ts", "Enable TypeScript support?", false),
    ConfigOption::question("examples", "Generate example test file?", true),
];

const DEPENDENCIES: &[Dependency] = &[
    Dependency::dev("@babel/core", "^7.13.0"),
    Dependency::dev("@babel/preset-env", "^7.13.0"),
    Dependency::dev("jest", "^26.6.0"),
    Dependency::dev("babel-jest", "^26.6.0"),
    Dependency::dev("svelte-jester", "^1.4.0"),
    Dependency::dev("@testing-library/svelte", "^3.0.0"),
    Dependency::dev("@testing-library/jest-dom", "^5.11.0").relies_on("jest-dom"),
    Dependency::dev("ts-jest", "^26.5.0").relies_on("ts"),
    Dependency::dev("@types/jest", "^26.0.22").relies_on("ts"),
    Dependency::dev("@types/testing-library__jest-dom", "^5.9.5").relies_on("ts"),
];

const TEMPLATES: &[EmbeddedTemplate] = &[
    EmbeddedTemplate::new(
        "jest.config.json",
        include_str!("../templates/jest.config.json"),
    ),
    EmbeddedTemplate::new(".babelrc", include_str!("../templates/.babelrc")),
    EmbeddedTemplate::new(
        "tsconfig.spec.json",
        include_str!("../templates/tsconfig.spec.json"),
    ),
    EmbeddedTemplate::new("index.spec.js", include_str!("../templates/index.spec.js")),
    EmbeddedTemplate::new("index.spec.ts", include_str!("../templates/index.spec.ts")),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SvelteJestAdder;

impl Adder for SvelteJestAdder {
    fn name(&self) -> &'static str {
        "@rossyman/svelte-add-jest"
    }

    fn configuration(&self) -> &[ConfigOption] {
        CONFIGURATION
    }

    fn dependencies(&self) -> &[Dependency] {
        DEPENDENCIES
    }

    fn templates(&self) -> TemplateSource {
        TemplateSource::from_env(TEMPLATE_DIR_ENV, TEMPLATES)
    }

    fn steps(&self, preset: &mut Preset) {
        safe_extract(preset, "Initializing Jest config", "jest.config.json");
        safe_extract(preset, "Initializing Babel config", ".babelrc");

        preset
            .edit_json(
                "jest.config.json",
                json!({"setupFilesAfterEnv": ["@testing-library/jest-dom/extend-expect"]}),
            )
            .with_title("Enabling Jest DOM Support")
            .when(|c| c.enabled("jest-dom"));

        preset
            .edit_json("tsconfig.json", json!({"exclude": ["src/**/*.spec.ts"]}))
            .with_title("Modifying TypeScript config for project")
            .when(|c| c.enabled("ts"));

        preset
            .edit_json(
                "jest.config.json",
                json!({
                    "transform": {
                        "^.+\\.svelte$": ["svelte-jester", {"preprocess": true}],
                        "^.+\\.ts$": "ts-jest"
                    },
                    "moduleFileExtensions": ["js", "svelte", "ts"],
                    "globals": {
                        "ts-jest": {"tsconfig": "tsconfig.spec.json"}
                    }
                }),
            )
            .with_title("Modifying Jest config for TypeScript transformation")
            .when(|c| c.enabled("ts"));

        safe_extract(
            preset,
            "Initializing TypeScript config for tests",
            "tsconfig.spec.json",
        )
        .when(|c| c.enabled("ts"));

        // The examples assert with DOM matchers, so they need jest-dom
        preset
            .add(Extract::new("index.spec.js").to(ROUTES_DIR))
            .with_title("Initializing example test file")
            .when(|c| c.enabled("examples") && c.enabled("jest-dom"))
            .when(|c| !c.enabled("ts"));

        preset
            .add(Extract::new("index.spec.ts").to(ROUTES_DIR))
            .with_title("Initializing example test file")
            .when(|c| c.enabled("examples") && c.enabled("jest-dom"))
            .when(|c| c.enabled("ts"));

        preset
            .edit_json(
                "package.json",
                json!({
                    "scripts": {
                        "test": "jest src --config jest.config.json",
                        "test:watch": "npm run test -- --watch"
                    }
                }),
            )
            .with_title("Adding test scripts to package.json");

        preset.add(
            Instruct::new(format!(
                "Run {}, {}, or {} to install dependencies",
                "npm install".magenta(),
                "pnpm install".magenta(),
                "yarn".magenta()
            ))
            .with_heading("What's next?"),
        );
    }
}
