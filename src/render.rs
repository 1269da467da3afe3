// ABOUTME: Renders a profile into the single-page portfolio HTML document.
// ABOUTME: Pure template substitution; field values are interpolated as given.

use bytes::Bytes;

use crate::types::{Experience, Identity, Profile, Project};

const DESCRIPTION_CHARS: usize = 150;

/// Render the portfolio page for `profile`, linking to `identity`'s GitHub page.
///
/// Never fails. Malformed fields end up in the page unchanged.
pub fn render(profile: &Profile, identity: &Identity) -> Bytes {
    let mut html = String::with_capacity(8 * 1024);
    head(&mut html, profile);
    hero(&mut html, profile, identity);
    skills(&mut html, &profile.skills);
    projects(&mut html, &profile.projects);
    experience(&mut html, &profile.experience);
    contact(&mut html, profile);
    Bytes::from(html)
}

fn head(html: &mut String, profile: &Profile) {
    let summary: String = profile.bio.chars().take(DESCRIPTION_CHARS).collect();
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name} - Portfolio</title>
    <meta name="description" content="{title} - {summary}...">
    <script src="https://cdn.tailwindcss.com"></script>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap" rel="stylesheet">
    <style>
        body {{ font-family: 'Inter', sans-serif; }}
    </style>
</head>
<body class="bg-white text-gray-900">
"#,
        name = profile.name,
        title = profile.title,
    ));
}

fn hero(html: &mut String, profile: &Profile, identity: &Identity) {
    html.push_str(&format!(
        r#"    <section class="min-h-screen flex items-center justify-center px-6">
        <div class="max-w-4xl mx-auto text-center">
            <div class="w-32 h-32 bg-gray-900 rounded-2xl mx-auto mb-8 flex items-center justify-center">
                <span class="text-3xl font-bold text-white">{initials}</span>
            </div>
            <h1 class="text-5xl font-bold mb-4">{name}</h1>
            <p class="text-2xl text-gray-600 mb-8">{title}</p>
            <p class="text-lg text-gray-600 max-w-2xl mx-auto mb-12">{bio}</p>
            <div class="flex items-center justify-center gap-4">
                <a href="mailto:{email}" class="px-6 py-3 bg-black text-white rounded-lg">Get in touch</a>
                <a href="https://github.com/{login}" class="px-6 py-3 border border-gray-200 rounded-lg">GitHub</a>
            </div>
        </div>
    </section>
"#,
        initials = profile.initials(),
        name = profile.name,
        title = profile.title,
        bio = profile.bio,
        email = profile.email,
        login = identity.login,
    ));
}

fn skills(html: &mut String, skills: &[String]) {
    html.push_str(
        r#"    <section class="py-20 px-6 bg-gray-50">
        <div class="max-w-4xl mx-auto">
            <h2 class="text-3xl font-bold mb-8 text-center">Skills &amp; Technologies</h2>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
"#,
    );
    for skill in skills {
        html.push_str(&format!(
            r#"                <div class="bg-white border border-gray-100 p-4 rounded-xl text-center"><span class="font-semibold">{skill}</span></div>"#
        ));
        html.push('\n');
    }
    html.push_str("            </div>\n        </div>\n    </section>\n");
}

fn projects(html: &mut String, projects: &[Project]) {
    html.push_str(
        r#"    <section class="py-20 px-6">
        <div class="max-w-4xl mx-auto">
            <h2 class="text-3xl font-bold mb-8 text-center">Featured Projects</h2>
            <div class="space-y-8">
"#,
    );
    for project in projects {
        let link = project
            .link
            .as_deref()
            .map(|href| format!(r#"<a href="{href}" class="text-gray-600">View</a>"#))
            .unwrap_or_default();
        let tech: String = project
            .tech
            .iter()
            .map(|t| format!(r#"<span class="px-3 py-1 bg-gray-100 rounded-full text-sm">{t}</span>"#))
            .collect();
        html.push_str(&format!(
            r#"                <div class="border border-gray-100 rounded-2xl p-8">
                    <div class="flex items-start justify-between mb-4">
                        <h3 class="text-2xl font-bold">{title}</h3>
                        {link}
                    </div>
                    <p class="text-gray-600 mb-6">{description}</p>
                    <div class="flex flex-wrap gap-2">{tech}</div>
                </div>
"#,
            title = project.title,
            description = project.description,
        ));
    }
    html.push_str("            </div>\n        </div>\n    </section>\n");
}

fn experience(html: &mut String, entries: &[Experience]) {
    html.push_str(
        r#"    <section class="py-20 px-6 bg-gray-50">
        <div class="max-w-4xl mx-auto">
            <h2 class="text-3xl font-bold mb-8 text-center">Experience &amp; Education</h2>
            <div class="space-y-8">
"#,
    );
    for entry in entries {
        html.push_str(&format!(
            r#"                <div class="bg-white border border-gray-100 rounded-2xl p-8">
                    <div class="flex justify-between mb-4">
                        <div>
                            <h3 class="text-xl font-bold">{title}</h3>
                            <p class="text-lg text-gray-600">{organization}</p>
                        </div>
                        <span class="text-gray-500">{duration}</span>
                    </div>
                    <p class="text-gray-600">{description}</p>
                </div>
"#,
            title = entry.title,
            organization = entry.organization,
            duration = entry.duration,
            description = entry.description,
        ));
    }
    html.push_str("            </div>\n        </div>\n    </section>\n");
}

fn contact(html: &mut String, profile: &Profile) {
    html.push_str(&format!(
        r#"    <section class="py-20 px-6">
        <div class="max-w-3xl mx-auto bg-black rounded-2xl p-12 text-center text-white">
            <h2 class="text-3xl font-bold mb-4">Let's work together</h2>
            <p class="text-lg mb-8 text-gray-300">I'm always open to discussing new opportunities and interesting projects.</p>
            <a href="mailto:{email}" class="px-8 py-4 bg-white text-black rounded-lg font-semibold">Send me an email</a>
        </div>
    </section>
    <footer class="py-12 px-6 border-t border-gray-100">
        <p class="text-center text-gray-500">&copy; {name}. Built with PromptFolio.</p>
    </footer>
</body>
</html>
"#,
        email = profile.email,
        name = profile.name,
    ));
}
