//! CSS styles for the call-script page.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base03: #002b36;
    --base02: #073642;
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --orange: #cb4b16;
    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --accent: var(--base2);
    --field-bg: rgba(38, 139, 210, 0.1);
    --field-hover: rgba(38, 139, 210, 0.2);
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

h1 { font-size: 1.5rem; font-weight: 600; }
h2 { font-size: 1.2rem; font-weight: 600; margin-bottom: 0.5em; }
h4 { font-size: 1rem; font-weight: 600; color: var(--base01); }

/* Header */
.page-header {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    flex-wrap: wrap;
    z-index: 100;
}

.page-header select,
.page-header input {
    padding: 0.3rem 0.5rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-size: 0.9rem;
}

.name-inputs { display: flex; gap: 0.5rem; }
.search-box { display: flex; gap: 0.25rem; margin-left: auto; }

.search-box button {
    background: var(--accent);
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.3rem 0.75rem;
    color: var(--fg);
    cursor: pointer;
}

/* Layout */
.layout { display: flex; min-height: calc(100vh - 3.5rem); }
main { flex: 1; padding: 1rem; max-width: 960px; }

.side-nav {
    width: 56px;
    border-right: 1px solid var(--border);
    padding: 0.75rem 0;
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 0.5rem;
}

.nav-item button {
    width: 36px;
    height: 36px;
    border-radius: 8px;
    border: 1px solid var(--border);
    background: var(--bg);
    color: var(--base01);
    font-weight: 600;
    cursor: pointer;
}

.nav-item.active button { background: var(--blue); color: var(--base3); border-color: var(--blue); }

.nav-tooltip {
    position: fixed;
    left: -9999px;
    background: var(--base02);
    color: var(--base3);
    padding: 4px 10px;
    border-radius: 4px;
    font-size: 0.8rem;
    white-space: nowrap;
    opacity: 0;
    transition: opacity 100ms ease;
    pointer-events: none;
    z-index: 1000;
}

.nav-tooltip.visible { opacity: 1; }

.sub-page { display: none; }
.sub-page.active { display: block; }
.sub-page ul { padding-left: 1.25rem; }

/* Script modules */
.script-nav-container {
    display: flex;
    gap: 0.5rem;
    flex-wrap: wrap;
    margin-bottom: 1rem;
}

.nav-btn {
    background: var(--accent);
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.3rem 0.9rem;
    color: var(--fg);
    cursor: pointer;
}

.nav-btn.active { background: var(--blue); border-color: var(--blue); color: var(--base3); }

.script-module { display: none; }
.script-module.active { display: block; }

.script-title-chat,
.script-title-voice,
.script-card-sub { display: none; }

.script-title-chat.active,
.script-title-voice.active { display: block; margin-top: 1.25rem; }
.script-card-sub.active { display: block; }

.script-title-chat h4::before { content: "chat"; }
.script-title-voice h4::before { content: "voice"; }

.script-title-chat h4::before,
.script-title-voice h4::before {
    font-size: 0.7rem;
    text-transform: uppercase;
    background: var(--accent);
    color: var(--muted);
    padding: 0.1rem 0.4rem;
    border-radius: 3px;
    margin-right: 0.5rem;
}

.script-title-chat p,
.script-title-voice p { color: var(--muted); font-size: 0.85rem; }

/* Cards */
.card-module {
    position: relative;
    cursor: pointer;
    transition: all 0.2s ease;
    padding: 12px 12px 40px 12px;
    margin: 0.5rem 0;
    border: 1px solid var(--border);
    border-radius: 6px;
}

.card-module:hover {
    transform: translateX(5px);
    background: rgba(38, 139, 210, 0.05);
}

.card-module.copying {
    pointer-events: none;
    opacity: 0.7;
}

.manual-edit {
    position: relative;
    padding: 2px 6px;
    border-radius: 4px;
    background: var(--field-bg);
    transition: all 0.2s ease;
    cursor: text;
    min-width: 60px;
    display: inline-block;
}

.manual-edit:hover { background: var(--field-hover); }

.manual-edit.editing {
    background: white;
    outline: 2px solid var(--blue);
    box-shadow: 0 2px 8px rgba(38, 139, 210, 0.2);
}

.module-reset-button {
    position: absolute;
    bottom: 8px;
    right: 12px;
    background: var(--red);
    color: white;
    border: none;
    border-radius: 4px;
    padding: 4px 12px;
    font-size: 12px;
    cursor: pointer;
    opacity: 0.8;
}

.module-reset-button:hover { opacity: 1; }

/* Copy tooltip */
.copy-tooltip {
    position: fixed;
    padding: 8px 16px;
    border-radius: 6px;
    color: white;
    font-size: 14px;
    background: var(--green);
    opacity: 0;
    transform: translateY(10px);
    transition: all 100ms cubic-bezier(0.4, 0, 0.2, 1);
    z-index: 9999;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
    white-space: nowrap;
    display: none;
}

.copy-tooltip.warning { background: var(--yellow); }
.copy-tooltip.error { background: var(--red); }
.copy-tooltip.info { background: var(--blue); }

.copy-tooltip.show {
    opacity: 1;
    display: block;
}
"#;
