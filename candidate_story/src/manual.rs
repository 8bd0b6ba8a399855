/*!

This is the long-form manual for `candidate_story` and `storyprep`.

## Input files

All the files are read once, before any transformation. A missing or malformed file stops
the program: there is no partial output.

### Names table (`names.csv`)

A CSV file with a single header row. Each column header is a candidate name, for example
`Joe_Biden`. The order of the columns is the order in which candidates are processed and
displayed.

### Candidate profiles (`candidates.json`)

A JSON object keyed by candidate name. Each value is an object of heading -> text, in the
order of the source profile:

```json
{
  "Pete_Buttigieg": {
    "Born": "Jan. 19, 1982 in South Bend, Ind.",
    "Current position": "Mayor of South Bend",
    "Previous roles": "Navy Reserve intelligence officer, McKinsey consultant",
    "Student debt": "Supports free college for low-income students",
    "*Experience": "Critics say being a mayor is not enough"
  }
}
```

Headings starting with `*` belong to the "Key criticisms" section. The value `n/a` means
that the profile has no content for this heading.

### Voter choice and favorability (`ranks.csv`)

Columns `Name`, `Primary`, `Favorability`, `Unfavorability`. Percentages may carry a `%`
suffix.

### Historical results (`1976-2016-president.csv`)

Columns `year`, `state`, `state_po`, `party`, `candidatevotes`, `totalvotes`. Only the rows
of the target year for the `democrat` and `republican` parties are used.

### State outlines (`us-states.json`)

A GeoJSON feature collection. Every feature has a `name` property and a `Polygon` or
`MultiPolygon` geometry.

## Transformations

* **Backgrounds**: the comma-separated items of `Current position` and `Previous roles`
  are matched against the keywords of four categories (legal, entrepreneurial, political,
  military). A candidate is linked to every category with at least one matching item.
* **Issues**: every heading of a profile is matched against the keywords of eleven issues.
  The first issue to match a heading claims it. The phrase "electoral college" is not an
  education topic.
* **Criticisms**: the `*` headings of every candidate, in order.
* **Voter choice**: candidates at or below 1% are grouped into an "Other" slice, together
  with the 2% of voters choosing an unlisted candidate. For each of them, an alternate view
  breaks the candidate out of "Other".
* **Favorability**: the unfavorable, neutral and favorable shares of every known candidate
  as a diverging bar centered on the neutral share.
* **State ties**: the state of birth and the state of professional ties of every candidate,
  found by matching state names, dotted abbreviations (`N.Y.`) and a few local spellings.
  The marker of a candidate is placed halfway between the center of the bounding box of the
  state and a random corner of its outline.

## Limitations

* Only the first state of birth and the first state of professional ties are displayed.
* The center of a state is the center of its bounding box, computed on the first ring of
  the first polygon. Islands are ignored.
*/
