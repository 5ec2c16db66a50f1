use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{entities::movie, pages::MovieForm};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

// Global filter, click-to-sort and paging over the rows already on the page.
const GRID_SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', () => {
  const table = document.getElementById('movies');
  if (!table) return;
  const body = table.tBodies[0];
  const filter = document.getElementById('filter');
  const pageSize = document.getElementById('page-size');
  const prev = document.getElementById('page-prev');
  const next = document.getElementById('page-next');
  const label = document.getElementById('page-label');
  let page = 0;

  const render = () => {
    const needle = (filter?.value ?? '').toLowerCase();
    const size = parseInt(pageSize?.value ?? '10', 10);
    const matching = Array.from(body.rows).filter((row) =>
      row.textContent.toLowerCase().includes(needle));
    const pages = Math.max(1, Math.ceil(matching.length / size));
    page = Math.min(page, pages - 1);
    for (const row of body.rows) row.hidden = true;
    matching.slice(page * size, (page + 1) * size).forEach((row) => { row.hidden = false; });
    if (label) label.textContent = `Page ${page + 1} of ${pages}`;
    if (prev) prev.disabled = page === 0;
    if (next) next.disabled = page >= pages - 1;
  };

  filter?.addEventListener('input', () => { page = 0; render(); });
  pageSize?.addEventListener('change', () => { page = 0; render(); });
  prev?.addEventListener('click', () => { page = Math.max(0, page - 1); render(); });
  next?.addEventListener('click', () => { page += 1; render(); });

  table.querySelectorAll('th[data-sort]').forEach((th) => {
    th.addEventListener('click', () => {
      const col = th.cellIndex;
      const asc = th.dataset.dir !== 'asc';
      th.dataset.dir = asc ? 'asc' : 'desc';
      const rows = Array.from(body.rows);
      rows.sort((a, b) => {
        const x = a.cells[col].textContent.trim();
        const y = b.cells[col].textContent.trim();
        const nx = parseFloat(x), ny = parseFloat(y);
        const cmp = !isNaN(nx) && !isNaN(ny) ? nx - ny : x.localeCompare(y);
        return asc ? cmp : -cmp;
      });
      rows.forEach((row) => body.appendChild(row));
      render();
    });
  });

  render();
});
"#;

const PAGE_SIZES: [u32; 3] = [10, 20, 30];

const INPUT_CLASS: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";

pub fn movies_page(movies: &[movie::Model]) -> String {
    page(
        "Movie Management",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-7xl mx-auto px-6 py-10" {
                    div class="flex items-center justify-between gap-6" {
                        h1 class="text-2xl font-bold text-gray-900" { "Movie Management" }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/edit" { "Add Movie" }
                    }

                    div class="mt-6 flex items-center justify-between gap-4" {
                        input id="filter" class="w-72 rounded-md border border-gray-300 px-3 py-1 text-sm" type="search" placeholder="Search";
                        p class="text-sm text-gray-500" { (movies.len()) " movies" }
                    }

                    div class="mt-4 overflow-x-auto bg-white shadow rounded-lg" {
                        table id="movies" class="min-w-full divide-y divide-gray-200 text-sm" {
                            thead class="bg-gray-100" {
                                tr {
                                    th class="px-3 py-2 text-left font-semibold text-gray-700" { "Actions" }
                                    @for label in ["Title", "Overview", "Poster Path", "Release Date", "Vote Average"] {
                                        th class="px-3 py-2 text-left font-semibold text-gray-700 cursor-pointer select-none" data-sort="true" { (label) }
                                    }
                                }
                            }
                            tbody class="divide-y divide-gray-100" {
                                @for movie in movies {
                                    (movie_row(movie))
                                }
                            }
                        }
                    }

                    div class="mt-4 flex items-center justify-end gap-3 text-sm text-gray-700" {
                        label for="page-size" { "Rows per page" }
                        select id="page-size" class="rounded-md border border-gray-300 px-2 py-1" {
                            @for size in PAGE_SIZES {
                                option value=(size) { (size) }
                            }
                        }
                        button id="page-prev" class="rounded-md border border-gray-300 px-3 py-1 hover:bg-gray-100 disabled:opacity-40" type="button" { "Previous" }
                        span id="page-label" { "Page 1 of 1" }
                        button id="page-next" class="rounded-md border border-gray-300 px-3 py-1 hover:bg-gray-100 disabled:opacity-40" type="button" { "Next" }
                    }
                }
            }
            script { (PreEscaped(GRID_SCRIPT)) }
        },
    )
}

pub fn movie_form_page(form: &MovieForm) -> String {
    let heading = if form.id.is_some() { "Edit Movie" } else { "Add Movie" };

    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="bg-white shadow rounded-lg" {
                        h1 class="rounded-t-lg bg-blue-50 px-6 py-4 text-xl font-semibold text-gray-900" { (heading) }

                        form class="p-6" method="post" action="/save" {
                            @if let Some(id) = &form.id {
                                input type="hidden" name="id" value=(id);
                            }
                            div class="grid gap-4 sm:grid-cols-3" {
                                (text_field("title", "Title", &form.title, "text"))
                                (text_field("poster_path", "Poster Path", &form.poster_path, "text"))
                                (text_field("release_date", "Release Date", &form.release_date, "date"))
                                (text_field("vote_average", "Vote Average", &form.vote_average, "text"))
                                @if form.id.is_none() {
                                    (text_field("trailer_url", "Trailer URL", &form.trailer_url, "text"))
                                    (text_field("full_movie_url", "Full Movie URL", &form.full_movie_url, "text"))
                                }
                            }
                            div class="mt-4" {
                                label class="block text-sm font-medium text-gray-700" for="overview" { "Overview" }
                                textarea class=(INPUT_CLASS) name="overview" id="overview" rows="4" { (form.overview) }
                            }
                            div class="mt-6 flex justify-end gap-3 rounded-b-lg bg-blue-50 -mx-6 -mb-6 px-6 py-4" {
                                a class="rounded-md px-4 py-2 text-gray-700 hover:bg-gray-100" href="/" { "Cancel" }
                                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn movie_row(movie: &movie::Model) -> Markup {
    html! {
        tr class="align-top" {
            td class="px-3 py-2 whitespace-nowrap" {
                div class="flex gap-2" {
                    a class="rounded bg-amber-500 px-2 py-1 text-xs font-semibold text-white hover:bg-amber-600" href=(format!("/edit/{}", movie.id)) { "Edit" }
                    form method="post" action=(format!("/delete/{}", movie.id)) {
                        button class="rounded bg-red-600 px-2 py-1 text-xs font-semibold text-white hover:bg-red-700" type="submit" { "Delete" }
                    }
                }
            }
            td class="px-3 py-2 font-medium text-gray-900" { (movie.title) }
            td class="px-3 py-2 text-gray-600 max-w-md" { (movie.overview.as_deref().unwrap_or_default()) }
            td class="px-3 py-2 text-gray-600 break-all" { (movie.poster_path.as_deref().unwrap_or_default()) }
            td class="px-3 py-2 text-gray-600 whitespace-nowrap" {
                (movie.release_date.as_deref().map(date_input_value).unwrap_or_default())
            }
            td class="px-3 py-2 text-gray-600" {
                @if let Some(vote) = movie.vote_average {
                    (vote)
                }
            }
        }
    }
}

fn text_field(name: &str, label: &str, value: &str, kind: &str) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) type=(kind) name=(name) id=(name) value=(value);
        }
    }
}

/// Normalizes stored release-date text to the `YYYY-MM-DD` form a date input
/// expects. Text that is neither a date nor a timestamp is returned as is.
pub fn date_input_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(date) = trimmed.parse::<jiff::civil::Date>() {
        return date.to_string();
    }
    if let Ok(ts) = trimmed.parse::<jiff::Timestamp>() {
        return ts.to_zoned(jiff::tz::TimeZone::UTC).date().to_string();
    }
    raw.to_string()
}
