#[cfg(test)]
pub const POST_DATA_YAML: &str = "---
title: What I learned after 20+ years of software development
date: 2022-04-02
author: thiago
tags: [career, programming]
---

How to be a great software engineer?

Someone asked me this question today and I didn't have an answer.

<!-- more -->

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. __The earlier you find that, the better.__
";

#[cfg(test)]
pub const POST_DATA_TOML: &str = "+++
title = \"Creating a daemon in System D\"
date = 2024-02-16
draft = false
+++
So, you created your awesome server-side application.
";

#[cfg(test)]
pub const POST_TPL_SRC: &str = r##"<h1>{{title}}</h1>
<p class="date">{{date}}</p>
{{#tags}}<span>{{tag}}</span>{{/tags}}
<article>{{{content}}}</article>
"##;

#[cfg(test)]
pub const LIST_TPL_SRC: &str = r##"<ul>
{{#posts}}<li><a href="{{link}}">{{title}}</a> {{date}}</li>
{{/posts}}</ul>
"##;
