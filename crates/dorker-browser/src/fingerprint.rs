use dorker_core::BrowserConfig;

/// Fingerprint configuration for anti-detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub languages: Vec<String>,
    pub vendor: String,
    pub platform: String,
    pub webgl_vendor: String,
    pub renderer: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub fix_hairline: bool,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self::from_browser_config(&BrowserConfig::default())
    }
}

impl FingerprintConfig {
    /// Windows desktop Chrome profile with the configured user agent and window size
    pub fn from_browser_config(config: &BrowserConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            languages: vec!["en-US".to_string(), "en".to_string()],
            vendor: "Google Inc.".to_string(),
            platform: "Win32".to_string(),
            webgl_vendor: "Intel Inc.".to_string(),
            renderer: "Intel Iris OpenGL Engine".to_string(),
            viewport_width: config.window_width,
            viewport_height: config.window_height,
            fix_hairline: true,
        }
    }

    /// Value for the `Accept-Language` header, e.g. `en-US,en`
    pub fn accept_language(&self) -> String {
        self.languages.join(",")
    }

    /// Primary language passed to Chrome via `--lang`
    pub fn primary_language(&self) -> &str {
        self.languages.first().map_or("en-US", String::as_str)
    }

    /// Script installed on every new document before page scripts run.
    ///
    /// Hides `navigator.webdriver` and spoofs the navigator and WebGL
    /// properties headless Chrome gives away.
    pub fn stealth_script(&self) -> String {
        let languages = self
            .languages
            .iter()
            .map(|l| format!("'{}'", js_escape(l)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut script = format!(
            r#"
Object.defineProperty(navigator, 'webdriver', {{ get: () => undefined, configurable: true }});
Object.defineProperty(navigator, 'languages', {{ get: () => [{languages}], configurable: true }});
Object.defineProperty(navigator, 'vendor', {{ get: () => '{vendor}', configurable: true }});
Object.defineProperty(navigator, 'platform', {{ get: () => '{platform}', configurable: true }});
window.chrome = window.chrome || {{ runtime: {{}}, loadTimes: function() {{}}, csi: function() {{}}, app: {{}} }};
(function() {{
    const patch = (proto) => {{
        const getParameter = proto.getParameter;
        proto.getParameter = function(parameter) {{
            if (parameter === 37445) return '{webgl_vendor}';
            if (parameter === 37446) return '{renderer}';
            return getParameter.call(this, parameter);
        }};
    }};
    if (window.WebGLRenderingContext) patch(WebGLRenderingContext.prototype);
    if (window.WebGL2RenderingContext) patch(WebGL2RenderingContext.prototype);
}})();
"#,
            vendor = js_escape(&self.vendor),
            platform = js_escape(&self.platform),
            webgl_vendor = js_escape(&self.webgl_vendor),
            renderer = js_escape(&self.renderer),
        );

        if self.fix_hairline {
            script.push_str(
                r"
Object.defineProperty(HTMLElement.prototype, 'offsetHeight', {
    get: function() {
        if (this.id === 'modernizr') return 1;
        return this.getBoundingClientRect().height;
    }
});
",
            );
        }

        script
    }
}

fn js_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
