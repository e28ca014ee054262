//! Gradle build scaffolding and the project README.

use super::project::GeneratedProject;
use super::{
    FabricContext, FABRIC_API_VERSION, GENERATOR_KEY, GRADLE_VERSION, JAVA_RELEASE,
    LOADER_VERSION, LOOM_VERSION, MINECRAFT_VERSION, YARN_MAPPINGS,
};

pub(crate) fn emit(project: &mut GeneratedProject, ctx: &FabricContext) {
    let mod_ = ctx.mod_;
    project.text("settings.gradle", generate_settings(mod_.mod_id()));
    project.text(
        "gradle.properties",
        generate_properties(mod_.mod_id(), mod_.version(), ctx.symbols.author_fragment()),
    );
    project.text("build.gradle", generate_build_gradle());
    project.text(
        "gradle/wrapper/gradle-wrapper.properties",
        generate_wrapper_properties(),
    );
    project.script("gradlew", generate_gradlew());
    project.text("gradlew.bat", generate_gradlew_bat());
}

pub(crate) fn readme(project: &mut GeneratedProject, ctx: &FabricContext) {
    project.text("README.md", generate_readme(ctx.mod_.name(), ctx.mod_id()));
}

/// Generates settings.gradle with the Fabric plugin repository.
pub fn generate_settings(mod_id: &str) -> String {
    format!(
        r#"pluginManagement {{
    repositories {{
        maven {{ url = "https://maven.fabricmc.net/" }}
        gradlePluginPortal()
    }}
}}

rootProject.name = "{mod_id}"
"#
    )
}

/// Generates gradle.properties with the pinned platform versions.
pub fn generate_properties(mod_id: &str, version: &str, author_fragment: &str) -> String {
    format!(
        r#"org.gradle.jvmargs=-Xmx2G
org.gradle.parallel=true
org.gradle.configuration-cache=false

minecraft_version={MINECRAFT_VERSION}
yarn_mappings={YARN_MAPPINGS}
loom_version={LOOM_VERSION}
loader_version={LOADER_VERSION}
fabric_version={FABRIC_API_VERSION}
mod_version={version}
maven_group=modgen.generated.{author_fragment}
archives_base_name={mod_id}
"#
    )
}

pub fn generate_build_gradle() -> String {
    format!(
        r#"plugins {{
    id 'fabric-loom' version '{LOOM_VERSION}'
    id 'maven-publish'
}}

loom {{
    enableModProvidedJavadoc = false
}}

version = project.mod_version
group = project.maven_group

base {{
    archivesName = project.archives_base_name
}}

repositories {{
    mavenCentral()
    maven {{ url "https://maven.fabricmc.net/" }}
}}

dependencies {{
    minecraft "com.mojang:minecraft:${{project.minecraft_version}}"
    mappings "net.fabricmc:yarn:${{project.yarn_mappings}}:v2"
    modImplementation "net.fabricmc:fabric-loader:${{project.loader_version}}"
    modImplementation "net.fabricmc.fabric-api:fabric-api:${{project.fabric_version}}"
}}

processResources {{
    inputs.property "version", project.version
    filesMatching("fabric.mod.json") {{
        expand "version": project.version
    }}
}}

tasks.withType(JavaCompile).configureEach {{
    it.options.release = {JAVA_RELEASE}
}}

java {{
    sourceCompatibility = JavaVersion.VERSION_{JAVA_RELEASE}
    targetCompatibility = JavaVersion.VERSION_{JAVA_RELEASE}
    withSourcesJar()
}}
"#
    )
}

pub fn generate_wrapper_properties() -> String {
    format!(
        r#"distributionBase=GRADLE_USER_HOME
distributionPath=wrapper/dists
distributionUrl=https\://services.gradle.org/distributions/gradle-{GRADLE_VERSION}-bin.zip
networkTimeout=10000
validateDistributionUrl=true
zipStoreBase=GRADLE_USER_HOME
zipStorePath=wrapper/dists
"#
    )
}

/// POSIX wrapper. Without `gradle-wrapper.jar` it bootstraps one through an
/// installed `gradle` in a scratch project, then execs the wrapper.
pub fn generate_gradlew() -> String {
    format!(
        r#"#!/usr/bin/env sh
set -eu

APP_HOME="$(CDPATH= cd -- "$(dirname "$0")" && pwd)"
WRAPPER_JAR="$APP_HOME/gradle/wrapper/gradle-wrapper.jar"

if [ ! -f "$WRAPPER_JAR" ]; then
    if ! command -v gradle >/dev/null 2>&1; then
        echo "Gradle wrapper JAR missing and 'gradle' is not installed." >&2
        echo "Install Gradle once, rerun ./gradlew build, and the wrapper will bootstrap." >&2
        exit 1
    fi

    echo "Gradle wrapper JAR missing. Bootstrapping with installed Gradle..."
    TMP_DIR="$(mktemp -d 2>/dev/null || mktemp -d -t modgen-gradle-wrapper)"
    trap 'rm -rf "$TMP_DIR"' EXIT INT TERM

    cat > "$TMP_DIR/settings.gradle" <<'EOF'
rootProject.name = "modgen-wrapper-bootstrap"
EOF
    cat > "$TMP_DIR/build.gradle" <<'EOF'
tasks.register("noop")
EOF

    (
        cd "$TMP_DIR"
        gradle -q wrapper --gradle-version {GRADLE_VERSION} --no-daemon
    )

    if [ ! -f "$TMP_DIR/gradle/wrapper/gradle-wrapper.jar" ]; then
        echo "Failed to generate gradle-wrapper.jar during bootstrap." >&2
        exit 1
    fi

    mkdir -p "$APP_HOME/gradle/wrapper"
    cp "$TMP_DIR/gradle/wrapper/gradle-wrapper.jar" "$WRAPPER_JAR"
    trap - EXIT INT TERM
    rm -rf "$TMP_DIR"
fi

if [ ! -f "$WRAPPER_JAR" ]; then
    echo "Gradle wrapper JAR is still missing after bootstrap." >&2
    exit 1
fi

exec java -Xmx64m -Xms64m -classpath "$WRAPPER_JAR" org.gradle.wrapper.GradleWrapperMain "$@"
"#
    )
}

pub fn generate_gradlew_bat() -> String {
    format!(
        r#"@ECHO OFF
SETLOCAL
SET APP_HOME=%~dp0
SET WRAPPER_JAR=%APP_HOME%gradle\wrapper\gradle-wrapper.jar

IF EXIST "%WRAPPER_JAR%" GOTO run

where gradle >NUL 2>NUL
IF ERRORLEVEL 1 (
    ECHO Gradle wrapper JAR missing and Gradle is not installed.
    ECHO Install Gradle once, rerun gradlew.bat build, and the wrapper will bootstrap.
    EXIT /B 1
)

ECHO Gradle wrapper JAR missing. Bootstrapping with installed Gradle...
SET TMP_DIR=%TEMP%\modgen_gradle_wrapper_%RANDOM%%RANDOM%
IF EXIST "%TMP_DIR%" RMDIR /S /Q "%TMP_DIR%"
MKDIR "%TMP_DIR%"
(
    ECHO rootProject.name = "modgen-wrapper-bootstrap"
) > "%TMP_DIR%\settings.gradle"
(
    ECHO tasks.register("noop")
) > "%TMP_DIR%\build.gradle"

PUSHD "%TMP_DIR%"
gradle -q wrapper --gradle-version {GRADLE_VERSION} --no-daemon
SET WRAP_ERR=%ERRORLEVEL%
POPD
IF NOT "%WRAP_ERR%"=="0" EXIT /B %WRAP_ERR%

IF NOT EXIST "%TMP_DIR%\gradle\wrapper\gradle-wrapper.jar" (
    ECHO Failed to generate gradle-wrapper.jar during bootstrap.
    RMDIR /S /Q "%TMP_DIR%"
    EXIT /B 1
)

IF NOT EXIST "%APP_HOME%gradle\wrapper" MKDIR "%APP_HOME%gradle\wrapper"
COPY /Y "%TMP_DIR%\gradle\wrapper\gradle-wrapper.jar" "%WRAPPER_JAR%" >NUL
RMDIR /S /Q "%TMP_DIR%"

IF NOT EXIST "%WRAPPER_JAR%" (
    ECHO Gradle wrapper JAR is still missing after bootstrap.
    EXIT /B 1
)

:run
java -Xmx64m -Xms64m -classpath "%WRAPPER_JAR%" org.gradle.wrapper.GradleWrapperMain %*
ENDLOCAL
"#
    )
}

pub fn generate_readme(name: &str, mod_id: &str) -> String {
    format!(
        r#"# {name}

Generated by ModGen using `{GENERATOR_KEY}`.

## Build

- Primary command:
  `./gradlew build`
- If `gradle-wrapper.jar` is missing, the generated wrapper script
  bootstraps it automatically using a locally installed `gradle`.

## Notes

- Generated manifest:
  `src/main/resources/data/{mod_id}/modgen/manifest.json`
- Insert custom Java with `JavaSource` elements for advanced Fabric APIs.
- Element types include `Command`, `Entity`, `Biome`, and `Worldgen`.
"#
    )
}
