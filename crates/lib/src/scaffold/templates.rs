/// `jig.toml` written by `jig scaffold`. `{name}` is substituted.
pub const JIG_TOML_TEMPLATE: &str = r#"# jig build definition

[project]
name = "{name}"
version = "0.1.0"
main-class = "app.Main"

[toolchain]
java-target = "17"
# kotlin-version = "1.9.22"

[dependencies]
compile = [
  # "com.google.guava:guava:33.0.0-jre",
]
test = []
runtime = []

[pack]
# classifier = "all"

[manifest]
# Implementation-Vendor = "example"
"#;

/// Sample entry point written under the first Java source root.
pub const MAIN_JAVA_TEMPLATE: &str = r#"package app;

public class Main {
    public static void main(String[] args) {
        System.out.println("Hello from {name}");
    }
}
"#;

/// Path of the sample entry point relative to its source root.
pub const MAIN_JAVA_PATH: &str = "app/Main.java";
