/*!

This is the long-form manual for `vote_registry` and `ballotbox`.

## Running an election

`ballotbox` starts with an empty registry and shows a menu:

```text
--- Interactive Voting System ---
1) Add candidate
2) List candidates
3) Cast vote
4) Show results
5) Reset election
0) Exit
Select option:
```

Candidates are numbered from 1 in the order they were added. The same name may be
registered several times, each registration is a separate candidate. There is no way
to remove a single candidate: `5) Reset election` drops all of them with their votes.

When voting, the list of candidates is printed and the number of the candidate is read.
`0` (or anything that does not start with a number) cancels the vote. A number that does
not match a listed candidate is rejected and nothing is counted.

## Results

Every candidate is listed with its number of votes and its share of the total, rounded to
two decimals. All the candidates sharing the highest count are winners: ties are not
broken. As long as no vote has been cast, no winner is printed.

With `--json`, the results are printed in JSON instead:

```json
{
  "total": 3,
  "noVotesCast": false,
  "results": [
    { "index": 1, "name": "Alice", "votes": 2, "percentage": "66.67" },
    { "index": 2, "name": "Bob", "votes": 1, "percentage": "33.33" }
  ],
  "winners": ["Alice"]
}
```

## Configuration

By default, at most 10 candidates can be registered and names are cut after 63 characters.
Both limits can be changed with `--capacity` and `--max-name-length`, or in a JSON file
passed with `--config`:

```json
{
  "capacity": 5,
  "maxNameLength": 20,
  "candidates": ["Alice", "Bob"]
}
```

The `candidates` of the file, followed by those given with `--candidates`, are registered
before the menu starts.

Logging goes to the standard error. It is controlled by `RUST_LOG`, and `--verbose` turns on
debug messages.

*/
